//! Text used when sharing a quote to social networks.

use crate::domain::Quote;

pub const SHARE_HASHTAGS: &str = "#まいにち名文 #名言 #文学 #日本文学";

/// Formats a quote as a shareable block ending with the app's hashtags.
pub fn share_text(quote: &Quote) -> String {
    let mut text = format!("「{}」\n\n{}", quote.text, quote.author);
    if let Some(work) = quote.work.as_deref().filter(|w| !w.is_empty()) {
        text.push_str(&format!(" 『{work}』より"));
    }
    if let Some(era) = quote.era.as_deref().filter(|e| !e.is_empty()) {
        text.push_str(&format!(" ({era})"));
    }
    text.push_str("\n\n");
    text.push_str(SHARE_HASHTAGS);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_work_and_era_when_present() {
        let mut quote = Quote::new("恥の多い生涯を送って来ました。", "太宰治");
        quote.work = Some("人間失格".to_string());
        quote.era = Some("昭和".to_string());

        assert_eq!(
            share_text(&quote),
            "「恥の多い生涯を送って来ました。」\n\n太宰治 『人間失格』より (昭和)\n\n#まいにち名文 #名言 #文学 #日本文学"
        );
    }

    #[test]
    fn omits_missing_sections() {
        let quote = Quote::new("text", "author");
        assert_eq!(share_text(&quote), format!("「text」\n\nauthor\n\n{SHARE_HASHTAGS}"));
    }
}
