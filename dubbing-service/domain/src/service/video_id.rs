use crate::DomainError;

/// Returns the first `v=` query value of a watch URL.
pub fn extract_video_id(url: &str) -> Result<String, DomainError> {
    let query = url
        .split_once('?')
        .map(|(_, query)| query)
        .ok_or_else(|| DomainError::validation_error("link has no query string"))?;
    let query = query.split('#').next().unwrap_or_default();

    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("v="))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| DomainError::validation_error("link has no video id"))
}

#[cfg(test)]
mod tests {
    use super::extract_video_id;

    #[test]
    fn reads_plain_watch_url() {
        let id = extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").expect("id");
        assert_eq!(id, "dQw4w9WgXcQ");
    }

    #[test]
    fn stops_at_next_parameter_and_fragment() {
        assert_eq!(
            extract_video_id("https://youtube.com/watch?v=abc123&t=42s").expect("id"),
            "abc123"
        );
        assert_eq!(
            extract_video_id("https://youtube.com/watch?v=abc123#comments").expect("id"),
            "abc123"
        );
    }

    #[test]
    fn finds_v_after_other_parameters() {
        assert_eq!(
            extract_video_id("https://youtube.com/watch?list=PL1&v=xyz&v=other").expect("id"),
            "xyz"
        );
    }

    #[test]
    fn missing_or_empty_id_is_rejected() {
        assert!(extract_video_id("https://youtube.com/").is_err());
        assert!(extract_video_id("https://youtube.com/watch?list=PL1").is_err());
        assert!(extract_video_id("https://youtube.com/watch?v=&t=1").is_err());
    }
}
