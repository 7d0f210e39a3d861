//! Keyword-based intent classification.
//!
//! An ordered-rule matcher, not an NLU pipeline: lower-cased substring
//! checks against fixed Spanish trigger vocabulary, tested in priority
//! order with first-match-wins. Ambiguous utterances containing several
//! trigger words resolve to whichever rule is checked first.

use assistant_core::TaskPatch;
use regex::Regex;
use tracing::trace;

use crate::intent::Intent;

/// Verbs that trigger a task listing (combined with the task noun).
const LIST_VERBS: &[&str] = &[
    "muestra",
    "muéstrame",
    "muestrame",
    "lista",
    "listar",
    "ver",
    "dame",
    "enséñame",
    "ensename",
];

/// Verbs that trigger a task creation.
const CREATE_VERBS: &[&str] = &["crea", "agrega", "añade", "anade", "nueva tarea"];

/// Verbs that trigger a task update.
const UPDATE_VERBS: &[&str] = &["actualiza", "modifica", "edita", "cambia", "marca", "completa"];

/// Verbs that trigger a deletion request.
const DELETE_VERBS: &[&str] = &["elimina", "borra", "quita"];

/// Verbs that, together with a vault keyword, trigger a move.
const MOVE_VERBS: &[&str] = &["mueve", "mover", "guarda", "pasa", "manda", "lleva"];

/// Keywords marking vault-targeted operations.
const VAULT_KEYWORDS: &[&str] = &["bóveda", "boveda", "privada", "vault"];

/// Markers that set `completed: true` on an update.
const DONE_MARKERS: &[&str] = &["completada", "completado", "terminada", "terminado", "hecha", "hecho"];

/// Markers that set `completed: false` on an update.
const PENDING_MARKERS: &[&str] = &["pendiente", "incompleta", "sin completar", "sin terminar"];

/// The single-word vault-grant shortcut.
const GRANT_TOKEN: &str = "concedido";

/// The task noun required by the list rule.
const TASK_NOUN: &str = "tarea";

/// Rule-based intent classifier.
///
/// Holds its compiled extraction patterns; build one per assistant and
/// reuse it across utterances.
pub struct Classifier {
    re_hash_id: Regex,
    re_tarea_id: Regex,
    re_title: Regex,
    re_title_fallback: Regex,
    re_quoted: Regex,
    re_description: Regex,
    re_new_title: Regex,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    /// Compile the extraction patterns.
    pub fn new() -> Self {
        Self {
            re_hash_id: Regex::new(r"#\s*(\d+)").expect("valid pattern"),
            re_tarea_id: Regex::new(r"(?i)tarea\s+(?:n[uú]mero\s+)?(\d+)").expect("valid pattern"),
            re_title: Regex::new(r"(?i)\b(?:llamada|llamado|titulada|titulado|que\s+diga)\s+(.+)$")
                .expect("valid pattern"),
            re_title_fallback: Regex::new(r"(?i)\btarea\s+(.+)$").expect("valid pattern"),
            re_quoted: Regex::new(r#""([^"]+)"|'([^']+)'"#).expect("valid pattern"),
            re_description: Regex::new(
                r"(?i)\b(?:con\s+)?(?:descripci[oó]n|detalles)\s*:?\s+(.+)$",
            )
            .expect("valid pattern"),
            re_new_title: Regex::new(r"(?i)t[ií]tulo\b.*?\s(?:a|por)\s+(.+)$")
                .expect("valid pattern"),
        }
    }

    /// Classify an utterance into an [`Intent`].
    ///
    /// The text is expected to be sanitized; matching happens on a
    /// lower-cased copy, extraction on the original to preserve case.
    pub fn classify(&self, text: &str) -> Intent {
        let lower = text.to_lowercase();

        let intent = if self.is_list(&lower) {
            Intent::ListTasks {
                include_vault: has_vault_keyword(&lower),
            }
        } else if contains_any(&lower, CREATE_VERBS) {
            Intent::CreateTask {
                title: self.extract_title(text),
                description: self.extract_description(text).unwrap_or_default(),
                is_vault: has_vault_keyword(&lower),
            }
        } else if contains_any(&lower, UPDATE_VERBS) {
            Intent::UpdateTask {
                task_id: self.extract_task_id(text),
                patch: self.extract_patch(text, &lower),
                is_vault: has_vault_keyword(&lower),
            }
        } else if contains_any(&lower, DELETE_VERBS) {
            Intent::DeleteTask {
                task_id: self.extract_task_id(text),
                is_vault: has_vault_keyword(&lower),
            }
        } else if contains_any(&lower, MOVE_VERBS) && has_vault_keyword(&lower) {
            Intent::MoveToVault {
                task_id: self.extract_task_id(text),
            }
        } else if lower.contains(GRANT_TOKEN) {
            Intent::Granted
        } else {
            Intent::GeneralChat
        };

        trace!(utterance = %text, intent = %intent.description(), "classified");
        intent
    }

    fn is_list(&self, lower: &str) -> bool {
        contains_any(lower, LIST_VERBS) && lower.contains(TASK_NOUN)
    }

    /// Extract an explicit numeric task reference (`#5` or `tarea 5`).
    pub fn extract_task_id(&self, text: &str) -> Option<i64> {
        if let Some(captures) = self.re_hash_id.captures(text) {
            return captures[1].parse().ok();
        }
        if let Some(captures) = self.re_tarea_id.captures(text) {
            return captures[1].parse().ok();
        }
        None
    }

    /// Extract a creation title from the text preceding any description
    /// clause.
    fn extract_title(&self, text: &str) -> Option<String> {
        let head = match self.re_description.find(text) {
            Some(m) => &text[..m.start()],
            None => text,
        };

        if let Some(captures) = self.re_title.captures(head) {
            return clean_title(&captures[1]);
        }

        if let Some(captures) = self.re_quoted.captures(head) {
            let quoted = captures.get(1).or_else(|| captures.get(2));
            if let Some(m) = quoted {
                return clean_title(m.as_str());
            }
        }

        if let Some(captures) = self.re_title_fallback.captures(head) {
            return clean_fallback_title(&captures[1]);
        }

        None
    }

    /// Extract a description clause ("con descripción ...", "detalles ...").
    fn extract_description(&self, text: &str) -> Option<String> {
        let captures = self.re_description.captures(text)?;
        let description = captures[1].trim().trim_matches('"').trim();
        if description.is_empty() {
            None
        } else {
            Some(description.to_string())
        }
    }

    /// Build the partial update carried by an update utterance.
    fn extract_patch(&self, text: &str, lower: &str) -> TaskPatch {
        let completed = if contains_any(lower, PENDING_MARKERS) {
            Some(false)
        } else if contains_any(lower, DONE_MARKERS) {
            Some(true)
        } else {
            None
        };

        let title = self
            .re_new_title
            .captures(text)
            .and_then(|c| clean_title(&c[1]));

        let description = self.extract_description(text);

        TaskPatch {
            title,
            description,
            completed,
        }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

fn has_vault_keyword(lower: &str) -> bool {
    contains_any(lower, VAULT_KEYWORDS)
}

/// Trim a captured title; reject empty or purely numeric captures.
fn clean_title(raw: &str) -> Option<String> {
    let cleaned = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim_end_matches(|c| c == '.' || c == ',')
        .trim();

    if cleaned.is_empty() {
        return None;
    }
    if cleaned.chars().all(|c| c.is_ascii_digit() || c == '#') {
        return None;
    }

    Some(cleaned.to_string())
}

/// Clean the permissive "tarea <rest>" capture: strip vault phrasing
/// and articles that are not part of a real title.
fn clean_fallback_title(raw: &str) -> Option<String> {
    let mut candidate = raw.trim().to_string();

    let noise_prefixes = [
        "privada",
        "en la bóveda",
        "en la boveda",
        "a la bóveda",
        "a la boveda",
        "nueva",
        "de",
    ];

    loop {
        let lower = candidate.to_lowercase();
        let Some(prefix) = noise_prefixes
            .iter()
            .find(|p| lower == **p || lower.starts_with(&format!("{} ", p)))
        else {
            break;
        };
        candidate = candidate[prefix.len()..].trim_start().to_string();
    }

    clean_title(&candidate)
}

/// Whether an utterance confirms a pending deletion: an affirmative
/// token ("sí"/"si") as a standalone word AND the word "confirmo".
pub fn is_delete_confirmation(lower: &str) -> bool {
    let has_affirmative = lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| word == "si" || word == "sí");

    has_affirmative && lower.contains("confirmo")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Intent {
        Classifier::new().classify(text)
    }

    #[test]
    fn test_list_plain() {
        assert_eq!(
            classify("muéstrame mis tareas"),
            Intent::ListTasks {
                include_vault: false
            }
        );
        assert_eq!(
            classify("lista las tareas"),
            Intent::ListTasks {
                include_vault: false
            }
        );
    }

    #[test]
    fn test_list_with_vault() {
        assert_eq!(
            classify("ver tareas de la bóveda"),
            Intent::ListTasks { include_vault: true }
        );
        assert_eq!(
            classify("muestra mis tareas privadas"),
            Intent::ListTasks { include_vault: true }
        );
    }

    #[test]
    fn test_list_requires_task_noun() {
        // "ver" alone is not a listing request
        assert_eq!(classify("ver el clima de hoy"), Intent::GeneralChat);
    }

    #[test]
    fn test_create_with_title_keyword() {
        match classify("crea una tarea llamada Comprar pan") {
            Intent::CreateTask {
                title,
                description,
                is_vault,
            } => {
                assert_eq!(title.as_deref(), Some("Comprar pan"));
                assert_eq!(description, "");
                assert!(!is_vault);
            }
            other => panic!("Expected CreateTask, got {:?}", other),
        }
    }

    #[test]
    fn test_create_with_description() {
        match classify("crea una tarea llamada Viaje con descripción reservar hotel y vuelos") {
            Intent::CreateTask {
                title, description, ..
            } => {
                assert_eq!(title.as_deref(), Some("Viaje"));
                assert_eq!(description, "reservar hotel y vuelos");
            }
            other => panic!("Expected CreateTask, got {:?}", other),
        }
    }

    #[test]
    fn test_create_without_title() {
        match classify("crea una tarea") {
            Intent::CreateTask { title, .. } => assert!(title.is_none()),
            other => panic!("Expected CreateTask, got {:?}", other),
        }
    }

    #[test]
    fn test_create_fallback_title() {
        match classify("agrega la tarea Pagar la renta") {
            Intent::CreateTask { title, .. } => {
                assert_eq!(title.as_deref(), Some("Pagar la renta"));
            }
            other => panic!("Expected CreateTask, got {:?}", other),
        }
    }

    #[test]
    fn test_create_vault_without_title() {
        // "privada" after "tarea" is vault phrasing, not a title
        match classify("crea una tarea privada") {
            Intent::CreateTask {
                title, is_vault, ..
            } => {
                assert!(title.is_none());
                assert!(is_vault);
            }
            other => panic!("Expected CreateTask, got {:?}", other),
        }
    }

    #[test]
    fn test_create_quoted_title() {
        match classify(r#"añade una tarea "Llamar al banco""#) {
            Intent::CreateTask { title, .. } => {
                assert_eq!(title.as_deref(), Some("Llamar al banco"));
            }
            other => panic!("Expected CreateTask, got {:?}", other),
        }
    }

    #[test]
    fn test_update_with_hash_id() {
        match classify("marca la tarea #3 como completada") {
            Intent::UpdateTask {
                task_id,
                patch,
                is_vault,
            } => {
                assert_eq!(task_id, Some(3));
                assert_eq!(patch.completed, Some(true));
                assert!(patch.title.is_none());
                assert!(!is_vault);
            }
            other => panic!("Expected UpdateTask, got {:?}", other),
        }
    }

    #[test]
    fn test_update_with_word_id() {
        match classify("actualiza la tarea 12 como pendiente") {
            Intent::UpdateTask { task_id, patch, .. } => {
                assert_eq!(task_id, Some(12));
                assert_eq!(patch.completed, Some(false));
            }
            other => panic!("Expected UpdateTask, got {:?}", other),
        }
    }

    #[test]
    fn test_update_without_id_falls_back_to_context() {
        match classify("márcala como terminada, actualiza eso") {
            Intent::UpdateTask { task_id, patch, .. } => {
                assert_eq!(task_id, None);
                assert_eq!(patch.completed, Some(true));
            }
            other => panic!("Expected UpdateTask, got {:?}", other),
        }
    }

    #[test]
    fn test_update_new_title() {
        match classify("cambia el título de la tarea 7 a Comprar fruta") {
            Intent::UpdateTask { task_id, patch, .. } => {
                assert_eq!(task_id, Some(7));
                assert_eq!(patch.title.as_deref(), Some("Comprar fruta"));
            }
            other => panic!("Expected UpdateTask, got {:?}", other),
        }
    }

    #[test]
    fn test_delete() {
        assert_eq!(
            classify("elimina la tarea #5"),
            Intent::DeleteTask {
                task_id: Some(5),
                is_vault: false
            }
        );
        assert_eq!(
            classify("borra la tarea 9 de la bóveda"),
            Intent::DeleteTask {
                task_id: Some(9),
                is_vault: true
            }
        );
    }

    #[test]
    fn test_delete_without_id() {
        assert_eq!(
            classify("elimínala, quita eso"),
            Intent::DeleteTask {
                task_id: None,
                is_vault: false
            }
        );
    }

    #[test]
    fn test_move_to_vault() {
        assert_eq!(
            classify("mueve la tarea #4 a la bóveda"),
            Intent::MoveToVault { task_id: Some(4) }
        );
        assert_eq!(
            classify("guarda eso en la bóveda"),
            Intent::MoveToVault { task_id: None }
        );
    }

    #[test]
    fn test_move_verb_without_vault_is_chat() {
        assert_eq!(classify("pasa por la tienda después"), Intent::GeneralChat);
    }

    #[test]
    fn test_granted() {
        assert_eq!(classify("concedido"), Intent::Granted);
        assert_eq!(classify("ok, concedido entonces"), Intent::Granted);
    }

    #[test]
    fn test_general_chat_fallback() {
        assert_eq!(classify("¿qué hora es?"), Intent::GeneralChat);
        assert_eq!(
            classify("dame un consejo de productividad"),
            Intent::GeneralChat
        );
    }

    #[test]
    fn test_priority_list_beats_delete() {
        // Contains both "lista" and "borra": list is checked first.
        assert_eq!(
            classify("borra de la lista mis tareas"),
            Intent::ListTasks {
                include_vault: false
            }
        );
    }

    #[test]
    fn test_priority_create_beats_update() {
        // "agrega" (create) and "cambia" (update) together: create wins.
        match classify("agrega una tarea llamada Revisión y cambia el resto") {
            Intent::CreateTask { .. } => {}
            other => panic!("Expected CreateTask, got {:?}", other),
        }
    }

    #[test]
    fn test_delete_confirmation_tokens() {
        assert!(is_delete_confirmation("sí, confirmo"));
        assert!(is_delete_confirmation("si confirmo"));
        assert!(is_delete_confirmation("sí confirmo que quiero eliminarla"));

        // one token alone is not enough
        assert!(!is_delete_confirmation("sí"));
        assert!(!is_delete_confirmation("confirmo"));
        // "si" must be a standalone word
        assert!(!is_delete_confirmation("considera confirmo"));
    }

    #[test]
    fn test_ids() {
        let classifier = Classifier::new();
        assert_eq!(classifier.extract_task_id("la tarea #15"), Some(15));
        assert_eq!(classifier.extract_task_id("# 8 por favor"), Some(8));
        assert_eq!(classifier.extract_task_id("la tarea 22"), Some(22));
        assert_eq!(classifier.extract_task_id("la tarea número 3"), Some(3));
        assert_eq!(classifier.extract_task_id("sin número"), None);
    }
}
