//! Trigger selection from temporal and causal cues.

use serde::{Deserialize, Serialize};

use crate::TriggerConfig;

/// How a scenario starts.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TriggerKind {
    /// Fixed cadence.
    Schedule,
    /// Inbound event delivered to a webhook.
    #[default]
    Webhook,
    /// Watch one of the detected services.
    Watch,
}

/// Decision table mapping cue phrases to a trigger kind.
#[derive(Debug, Clone)]
pub struct TriggerClassifier {
    schedule_cues: Vec<String>,
    event_cues: Vec<String>,
    default: TriggerKind,
}

impl TriggerClassifier {
    pub fn new(config: &TriggerConfig) -> Self {
        Self {
            schedule_cues: config.schedule_cues.clone(),
            event_cues: config.event_cues.clone(),
            default: config.default,
        }
    }

    /// Schedule cues win over event cues, which win over the caller's
    /// explicit choice. Without any of those the configured default applies.
    pub fn classify(
        &self,
        text: &str,
        explicit: Option<TriggerKind>,
    ) -> TriggerKind {
        let lowered = text.to_lowercase();
        let has_cue = |cues: &[String]| cues.iter().any(|c| lowered.contains(c.as_str()));

        if has_cue(&self.schedule_cues) {
            TriggerKind::Schedule
        } else if has_cue(&self.event_cues) {
            TriggerKind::Webhook
        } else {
            explicit.unwrap_or(self.default)
        }
    }
}

impl Default for TriggerClassifier {
    fn default() -> Self {
        Self::new(&TriggerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_cue() {
        let classifier = TriggerClassifier::default();
        assert_eq!(classifier.classify("Tous les jours, envoyer un résumé par email.", None), TriggerKind::Schedule);
        assert_eq!(classifier.classify("run it every day", Some(TriggerKind::Watch)), TriggerKind::Schedule);
        assert_eq!(classifier.classify("via CRON", None), TriggerKind::Schedule);
    }

    #[test]
    fn test_schedule_beats_event() {
        let classifier = TriggerClassifier::default();
        assert_eq!(classifier.classify("Chaque jour, quand un formulaire arrive", None), TriggerKind::Schedule);
    }

    #[test]
    fn test_event_cue_overrides_explicit_choice() {
        let classifier = TriggerClassifier::default();
        assert_eq!(classifier.classify("Quand un paiement arrive", Some(TriggerKind::Schedule)), TriggerKind::Webhook);
        assert_eq!(classifier.classify("when a payment lands", None), TriggerKind::Webhook);
    }

    #[test]
    fn test_cues_do_not_fire_inside_french_words() {
        let classifier = TriggerClassifier::default();
        for text in ["Informer l'équipe sur Slack", "Transformer les données en rapport", "Publier sur la plateforme", "Envoyer un coupon"] {
            assert_eq!(classifier.classify(text, Some(TriggerKind::Schedule)), TriggerKind::Schedule, "{text}");
        }
    }

    #[test]
    fn test_fallback_to_explicit_then_default() {
        let classifier = TriggerClassifier::default();
        assert_eq!(classifier.classify("Ajouter une ligne", Some(TriggerKind::Watch)), TriggerKind::Watch);
        assert_eq!(classifier.classify("Ajouter une ligne", None), TriggerKind::Webhook);
        assert_eq!(classifier.classify("", None), TriggerKind::Webhook);
    }

    #[test]
    fn test_custom_cue_table() {
        let config = TriggerConfig {
            schedule_cues: vec!["jeden tag".to_string()],
            event_cues: vec!["wenn".to_string()],
            default: TriggerKind::Schedule,
        };
        let classifier = TriggerClassifier::new(&config);
        assert_eq!(classifier.classify("Jeden Tag berichten", None), TriggerKind::Schedule);
        assert_eq!(classifier.classify("Wenn ein Formular kommt", None), TriggerKind::Webhook);
        assert_eq!(classifier.classify("tous les jours", None), TriggerKind::Schedule);
        assert_eq!(classifier.classify("quand", Some(TriggerKind::Watch)), TriggerKind::Watch);
    }
}
