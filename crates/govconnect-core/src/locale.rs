//! Localized assistant strings.
//!
//! Localization is an injected string-lookup service with a defined fallback
//! chain: the requested language first, then English, then the key itself.
//! Display locale is an explicit request field, not ambient state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Display language requested by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Te,
}

impl Language {
    /// Parse a language tag, defaulting to English for anything unknown.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "hi" => Language::Hi,
            "te" => Language::Te,
            _ => Language::En,
        }
    }
}

/// String catalog keyed by `(key, language)`.
pub struct Catalog {
    entries: HashMap<(&'static str, Language), &'static str>,
}

impl Catalog {
    /// Catalog seeded with the assistant strings GovConnect ships.
    pub fn govconnect() -> Self {
        let mut entries = HashMap::new();
        let mut insert = |key, lang, text| {
            entries.insert((key, lang), text);
        };

        insert("assistant.greeting", Language::En, "Hi! I'm your GovConnect assistant. I can help you with government schemes, forms, and complaints. How can I assist you today?");
        insert("assistant.greeting", Language::Hi, "नमस्ते! मैं आपका GovConnect सहायक हूं। मैं आपको सरकारी योजनाओं, फॉर्मों और शिकायतों में मदद कर सकता हूं। आज मैं आपकी कैसे सहायता कर सकता हूं?");
        insert("assistant.greeting", Language::Te, "హాయ! నేను మీ GovConnect సహాయకుడిని. నేను మీకు ప్రభుత్వ పథకాలు, ఫారమ్\u{200c}లు మరియు ఫిర్యాదులలో సహాయం చేయగలను. ఈరోజు నేను మీకు ఎలా సహాయం చేయగలను?");

        insert("assistant.cleared", Language::En, "Chat cleared. How can I help you today?");
        insert("assistant.cleared", Language::Hi, "चैट साफ़ हो गई। आज मैं आपकी कैसे मदद कर सकता हूं?");
        insert("assistant.cleared", Language::Te, "చాట్ క్లియర్ చేయబడింది. ఈరోజు నేను మీకు ఎలా సహాయం చేయగలను?");

        insert("assistant.unavailable", Language::En, "I understand you need help with that. I could not reach the assistant backend just now, but you can still browse schemes, forms, and complaints directly.");
        insert("assistant.unavailable", Language::Hi, "मैं समझता हूं कि आपको इसमें मदद की जरूरत है। अभी सहायक बैकएंड से संपर्क नहीं हो सका, लेकिन आप योजनाएं, फॉर्म और शिकायतें सीधे देख सकते हैं।");
        insert("assistant.unavailable", Language::Te, "మీకు దీనిలో సహాయం కావాలని నేను అర్థం చేసుకున్నాను. ప్రస్తుతం సహాయక బ్యాకెండ్\u{200c}ను చేరుకోలేకపోయాను, కానీ మీరు పథకాలు, ఫారమ్\u{200c}లు మరియు ఫిర్యాదులను నేరుగా చూడవచ్చు.");

        Self { entries }
    }

    /// Look up a key. Missing in the requested language falls back to
    /// English; missing everywhere returns the key's source string.
    pub fn text(&self, language: Language, key: &'static str) -> &'static str {
        self.entries
            .get(&(key, language))
            .or_else(|| self.entries.get(&(key, Language::En)))
            .copied()
            .unwrap_or(key)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::govconnect()
    }
}
