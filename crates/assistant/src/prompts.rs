//! Fixed prompt templates for the language model.

/// System preamble prepended to every fallback-chat prompt.
pub const CHAT_PREAMBLE: &str = "Eres un asistente de tareas. Ayudas a organizar tareas, \
das consejos de productividad y respondes preguntas en español. Sé breve y amable.";

/// Build the fallback-chat prompt for a sanitized utterance.
pub fn chat_prompt(text: &str) -> String {
    format!("{}\n\nUsuario: {}", CHAT_PREAMBLE, text)
}

/// Build the description-suggestion prompt for a sanitized title.
pub fn suggestion_prompt(title: &str) -> String {
    format!(
        "Eres un asistente que ayuda a organizar tareas. Dado el título de una tarea \
\"{}\", sugiere una descripción breve y útil en español (máximo 80 caracteres). \
Responde SOLO con la descripción, sin comillas ni explicaciones adicionales.",
        title
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_prompt_carries_preamble_and_text() {
        let prompt = chat_prompt("cómo organizo mi semana");
        assert!(prompt.starts_with(CHAT_PREAMBLE));
        assert!(prompt.ends_with("Usuario: cómo organizo mi semana"));
    }

    #[test]
    fn test_suggestion_prompt_interpolates_title() {
        let prompt = suggestion_prompt("Comprar pan");
        assert!(prompt.contains("\"Comprar pan\""));
        assert!(prompt.contains("80 caracteres"));
    }
}
