//! Human-readable execution plan.

use crate::ModuleModel;

/// Mapping hints, emitted when a downstream module targets the application.
const MAPPING_HINTS: [(&str, &str); 5] = [
    ("Google Sheets", "- Google Sheets: mappez champSortie.* vers les colonnes"),
    ("Notion", "- Notion: mappez champSortie.* vers les propriétés"),
    ("Slack", "- Slack: message = resume + puces des insights"),
    ("Gmail", "- Gmail: objet = résumé court, corps = résumé + détails"),
    ("Google Calendar", "- Calendar: titre = champSortie.titre, dates = champSortie.debut/fin"),
];

/// Renders the plan that accompanies a blueprint.
///
/// The plan is built from the same modules as the blueprint, so both agree
/// on the trigger, the AI model and the downstream applications.
pub fn render_plan(
    idea: &str,
    trigger: &ModuleModel,
    ai: &ModuleModel,
    downstream: &[ModuleModel],
    error: &ModuleModel,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("# Objectif".to_string());
    lines.push(format!("- {}", idea));
    lines.push(String::new());

    lines.push("# Déclencheur".to_string());
    lines.push(format!("- {}", trigger.name));
    lines.push(String::new());

    lines.push("# Flux principal".to_string());
    lines.push("1. Normaliser les données (Tools – JSON > Normalize)".to_string());
    lines.push(format!(
        "2. Appel IA ({} – {}) pour analyser, structurer et résumer les données",
        ai.app,
        ai.model.as_deref().unwrap_or_default()
    ));
    for (idx, module) in downstream.iter().enumerate() {
        lines.push(format!("{}. {}", idx + 3, module.name));
    }
    lines.push(String::new());

    lines.push("# Prompt IA (suggéré)".to_string());
    lines.push("System: Tu es un expert Make et data product.".to_string());
    lines.push("User: Utilise le contenu ci-dessous pour produire {insights[], resume, champSortie:{...}} en JSON strict.".to_string());
    lines.push("{{data}}".to_string());
    lines.push(String::new());

    lines.push("# Mappages recommandés".to_string());
    lines.push("- Entrée IA: données normalisées du module 2 ({{data}})".to_string());
    for (app, hint) in MAPPING_HINTS {
        if downstream.iter().any(|m| m.app == app) {
            lines.push(hint.to_string());
        }
    }
    lines.push(String::new());

    lines.push("# Gestion des erreurs".to_string());
    lines.push(format!("- {}", error.name));

    lines.join("\n")
}
