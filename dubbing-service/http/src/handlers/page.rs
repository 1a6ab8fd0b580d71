use axum::response::Html;
use dubbing_domain::TargetLanguage;

pub async fn index() -> Html<String> {
    Html(render_form())
}

fn render_form() -> String {
    let options: String = TargetLanguage::ALL
        .iter()
        .map(|language| {
            format!(
                r#"        <option value="{}">{}</option>
"#,
                language.code(),
                language.display_name()
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Video Dubbing</title>
</head>
<body>
    <h1>Dub a YouTube video</h1>
    <form method="post" action="/">
        <label for="link">Video link</label>
        <input type="url" id="link" name="link" required>
        <label for="target_lang">Target language</label>
        <select id="target_lang" name="target_lang">
{options}        </select>
        <button type="submit">Dub</button>
    </form>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_offers_every_target_language() {
        let page = render_form();

        assert_eq!(page.matches("<option ").count(), TargetLanguage::ALL.len());
        assert!(page.contains(r#"<option value="ta_IN">"#));
        assert!(page.contains(r#"name="link""#));
    }
}
