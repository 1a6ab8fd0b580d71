use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Source language of every transcript handed to the translator.
pub const SOURCE_MODEL_LANGUAGE: &str = "en_XX";

/// Languages a video can be dubbed into, identified by region-qualified codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetLanguage {
    #[serde(rename = "en_US")]
    English,
    #[serde(rename = "es_XX")]
    Spanish,
    #[serde(rename = "fr_XX")]
    French,
    #[serde(rename = "de_DE")]
    German,
    #[serde(rename = "hi_IN")]
    Hindi,
    #[serde(rename = "it_IT")]
    Italian,
    #[serde(rename = "nl_NL")]
    Dutch,
    #[serde(rename = "pt_PT")]
    Portuguese,
    #[serde(rename = "ru_RU")]
    Russian,
    #[serde(rename = "zh_CN")]
    Chinese,
    #[serde(rename = "ar_AR")]
    Arabic,
    #[serde(rename = "ta_IN")]
    Tamil,
    #[serde(rename = "te_IN")]
    Telugu,
    #[serde(rename = "bn_IN")]
    Bengali,
    #[serde(rename = "mr_IN")]
    Marathi,
    #[serde(rename = "gu_IN")]
    Gujarati,
    #[serde(rename = "pa_IN")]
    Punjabi,
}

impl TargetLanguage {
    pub const ALL: [TargetLanguage; 17] = [
        TargetLanguage::English,
        TargetLanguage::Spanish,
        TargetLanguage::French,
        TargetLanguage::German,
        TargetLanguage::Hindi,
        TargetLanguage::Italian,
        TargetLanguage::Dutch,
        TargetLanguage::Portuguese,
        TargetLanguage::Russian,
        TargetLanguage::Chinese,
        TargetLanguage::Arabic,
        TargetLanguage::Tamil,
        TargetLanguage::Telugu,
        TargetLanguage::Bengali,
        TargetLanguage::Marathi,
        TargetLanguage::Gujarati,
        TargetLanguage::Punjabi,
    ];

    /// Code submitted by the web form.
    pub fn code(self) -> &'static str {
        match self {
            TargetLanguage::English => "en_US",
            TargetLanguage::Spanish => "es_XX",
            TargetLanguage::French => "fr_XX",
            TargetLanguage::German => "de_DE",
            TargetLanguage::Hindi => "hi_IN",
            TargetLanguage::Italian => "it_IT",
            TargetLanguage::Dutch => "nl_NL",
            TargetLanguage::Portuguese => "pt_PT",
            TargetLanguage::Russian => "ru_RU",
            TargetLanguage::Chinese => "zh_CN",
            TargetLanguage::Arabic => "ar_AR",
            TargetLanguage::Tamil => "ta_IN",
            TargetLanguage::Telugu => "te_IN",
            TargetLanguage::Bengali => "bn_IN",
            TargetLanguage::Marathi => "mr_IN",
            TargetLanguage::Gujarati => "gu_IN",
            TargetLanguage::Punjabi => "pa_IN",
        }
    }

    /// Code understood by the translation model's tokenizer.
    pub fn model_code(self) -> &'static str {
        match self {
            TargetLanguage::English => "en_XX",
            TargetLanguage::Dutch => "nl_XX",
            TargetLanguage::Portuguese => "pt_XX",
            other => other.code(),
        }
    }

    /// Code understood by the speech synthesis engine.
    pub fn speech_code(self) -> &'static str {
        match self {
            TargetLanguage::English => "en",
            TargetLanguage::Spanish => "es",
            TargetLanguage::French => "fr",
            TargetLanguage::German => "de",
            TargetLanguage::Hindi => "hi",
            TargetLanguage::Italian => "it",
            TargetLanguage::Dutch => "nl",
            TargetLanguage::Portuguese => "pt",
            TargetLanguage::Russian => "ru",
            TargetLanguage::Chinese => "zh",
            TargetLanguage::Arabic => "ar",
            TargetLanguage::Tamil => "ta",
            TargetLanguage::Telugu => "te",
            TargetLanguage::Bengali => "bn",
            TargetLanguage::Marathi => "mr",
            TargetLanguage::Gujarati => "gu",
            TargetLanguage::Punjabi => "pa",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TargetLanguage::English => "English",
            TargetLanguage::Spanish => "Spanish",
            TargetLanguage::French => "French",
            TargetLanguage::German => "German",
            TargetLanguage::Hindi => "Hindi",
            TargetLanguage::Italian => "Italian",
            TargetLanguage::Dutch => "Dutch",
            TargetLanguage::Portuguese => "Portuguese",
            TargetLanguage::Russian => "Russian",
            TargetLanguage::Chinese => "Chinese",
            TargetLanguage::Arabic => "Arabic",
            TargetLanguage::Tamil => "Tamil",
            TargetLanguage::Telugu => "Telugu",
            TargetLanguage::Bengali => "Bengali",
            TargetLanguage::Marathi => "Marathi",
            TargetLanguage::Gujarati => "Gujarati",
            TargetLanguage::Punjabi => "Punjabi",
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TargetLanguage {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        TargetLanguage::ALL
            .into_iter()
            .find(|language| language.code().eq_ignore_ascii_case(value))
            .ok_or_else(|| {
                DomainError::validation_error(&format!("unsupported target language `{value}`"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_parse_back_to_the_same_language() {
        for language in TargetLanguage::ALL {
            assert_eq!(language.code().parse::<TargetLanguage>().unwrap(), language);
        }
    }

    #[test]
    fn model_codes_differ_only_where_the_tokenizer_needs_it() {
        assert_eq!(TargetLanguage::English.model_code(), "en_XX");
        assert_eq!(TargetLanguage::Dutch.model_code(), "nl_XX");
        assert_eq!(TargetLanguage::Portuguese.model_code(), "pt_XX");
        assert_eq!(TargetLanguage::Tamil.model_code(), "ta_IN");
        assert_eq!(TargetLanguage::Spanish.model_code(), "es_XX");
    }

    #[test]
    fn speech_codes_are_two_letter_tags() {
        assert_eq!(TargetLanguage::Chinese.speech_code(), "zh");
        assert_eq!(TargetLanguage::Punjabi.speech_code(), "pa");
        assert!(TargetLanguage::ALL
            .iter()
            .all(|language| language.speech_code().len() == 2));
    }

    #[test]
    fn unknown_code_is_a_validation_error() {
        let error = "xx_YY".parse::<TargetLanguage>().unwrap_err();
        assert!(matches!(error, DomainError::Validation(_)));
    }

    #[test]
    fn serde_uses_form_codes() {
        let encoded = serde_json::to_string(&TargetLanguage::German).unwrap();
        assert_eq!(encoded, "\"de_DE\"");
        let decoded: TargetLanguage = serde_json::from_str("\"hi_IN\"").unwrap();
        assert_eq!(decoded, TargetLanguage::Hindi);
    }
}
