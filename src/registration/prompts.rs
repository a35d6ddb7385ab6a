//! Fixed bot messages and the button prompts that drive each step.

use super::labels::{ButtonLabel, Schedule, WorkType, Zone, labels_of};

pub const GREETING: &str = "¡Hola! 👋 ¿Cómo te llamas?";
pub const ASK_WORK_TYPE: &str = "¿Qué tipo de trabajo buscas?";
pub const ASK_ZONE: &str = "¿En qué zona?";
pub const ASK_AVAILABILITY: &str = "¿En qué horario estás disponible?";
pub const REGISTRATION_COMPLETE: &str = "✅ ¡Registro completado! Te notificaremos cuando haya trabajos que coincidan con tus preferencias.";
pub const RETRY_APOLOGY: &str = "❌ Hubo un error. Por favor, intenta nuevamente.";

/// One outbound message: text plus optional buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: &'static str,
    pub options: Vec<&'static str>,
}

impl Prompt {
    pub fn plain(text: &'static str) -> Self {
        Self {
            text,
            options: Vec::new(),
        }
    }

    pub fn with_options(text: &'static str, options: Vec<&'static str>) -> Self {
        Self { text, options }
    }

    pub fn greeting() -> Self {
        Self::plain(GREETING)
    }

    pub fn work_type() -> Self {
        Self::with_options(ASK_WORK_TYPE, labels_of(WorkType::ALL))
    }

    pub fn zone() -> Self {
        Self::with_options(ASK_ZONE, labels_of(Zone::OFFERED))
    }

    pub fn availability() -> Self {
        Self::with_options(ASK_AVAILABILITY, labels_of(Schedule::ALL))
    }

    pub fn complete() -> Self {
        Self::plain(REGISTRATION_COMPLETE)
    }

    pub fn apology() -> Self {
        Self::plain(RETRY_APOLOGY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_type_prompt_offers_three_buttons() {
        let prompt = Prompt::work_type();
        assert_eq!(prompt.options, vec!["Fotos", "Modelaje", "Publicidad"]);
    }

    #[test]
    fn availability_prompt_offers_schedule_labels() {
        assert_eq!(Prompt::availability().options, vec!["Mañana", "Tarde", "Noche"]);
    }

    #[test]
    fn terminal_prompts_have_no_buttons() {
        assert!(Prompt::greeting().options.is_empty());
        assert!(Prompt::complete().options.is_empty());
        assert!(Prompt::apology().options.is_empty());
    }
}
