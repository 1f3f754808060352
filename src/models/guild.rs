use poise::serenity_prelude as serenity;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Discord caps modals at 5 text inputs
pub const MAX_MODAL_FIELDS: usize = 5;

/// Input style of a form question
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldStyle {
    Short,
    Paragraph,
}

impl FieldStyle {
    /// Normalize raw admin input. Anything that is not "paragraph"
    /// (case-insensitive) falls back to Short; never an error.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("paragraph") {
            FieldStyle::Paragraph
        } else {
            FieldStyle::Short
        }
    }

    /// French display label used in the config menus
    pub fn label_fr(&self) -> &'static str {
        match self {
            FieldStyle::Short => "Court",
            FieldStyle::Paragraph => "Paragraphe",
        }
    }
}

/// Normalize the "obligatoire ?" admin input: "oui" (case-insensitive)
/// means required, anything else means optional.
pub fn parse_required(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("oui")
}

/// One question of the recruitment form
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Unique within a config; correlates a submitted answer to its question
    pub id: String,
    pub label: String,
    pub placeholder: String,
    pub required: bool,
    pub style: FieldStyle,
    pub min_length: Option<u16>,
    pub max_length: Option<u16>,
}

impl FormField {
    /// Build a field from raw modal input, deriving a process-unique id
    /// from the creation time.
    pub fn from_input(label: String, placeholder: String, style: &str, required: &str) -> Self {
        FormField {
            id: format!("field_{}", chrono::Utc::now().timestamp_millis()),
            label,
            placeholder,
            required: parse_required(required),
            style: FieldStyle::parse(style),
            min_length: None,
            max_length: None,
        }
    }
}

/// Errors from form-field operations, reported to the caller and never fatal
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("field limit of {} reached", MAX_MODAL_FIELDS)]
    LimitReached,
    #[error("field not found")]
    NotFound,
}

/// Guild (server) specific configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GuildConfig {
    /// Category under which ticket channels are created
    pub ticket_category_id: Option<serenity::ChannelId>,
    /// Role granted visibility into tickets
    pub staff_role_id: Option<serenity::RoleId>,
    /// Stored and displayed only; no log is written yet
    pub log_channel_id: Option<serenity::ChannelId>,
    pub welcome_message: String,
    pub modal_fields: Vec<FormField>,
    /// "#RRGGBB" string as typed by the admin
    pub embed_color: String,
    pub embed_title: String,
    pub embed_description: String,
    pub button_label: String,
    /// Template containing a {username} placeholder
    pub ticket_name_format: String,
}

impl Default for GuildConfig {
    fn default() -> Self {
        GuildConfig {
            ticket_category_id: None,
            staff_role_id: None,
            log_channel_id: None,
            welcome_message:
                "Merci de votre candidature ! Un membre du staff va vous répondre bientôt."
                    .to_string(),
            modal_fields: vec![
                FormField {
                    id: "age".to_string(),
                    label: "Quel est votre âge ?".to_string(),
                    placeholder: "Ex: 18".to_string(),
                    required: true,
                    style: FieldStyle::Short,
                    min_length: None,
                    max_length: Some(3),
                },
                FormField {
                    id: "experience".to_string(),
                    label: "Avez-vous de l'expérience ?".to_string(),
                    placeholder: "Décrivez votre expérience...".to_string(),
                    required: true,
                    style: FieldStyle::Paragraph,
                    min_length: Some(20),
                    max_length: Some(1000),
                },
                FormField {
                    id: "motivation".to_string(),
                    label: "Pourquoi nous rejoindre ?".to_string(),
                    placeholder: "Expliquez votre motivation...".to_string(),
                    required: true,
                    style: FieldStyle::Paragraph,
                    min_length: Some(20),
                    max_length: Some(1000),
                },
            ],
            embed_color: "#5865F2".to_string(),
            embed_title: "📋 Recrutement".to_string(),
            embed_description: "Cliquez sur le bouton ci-dessous pour postuler !".to_string(),
            button_label: "✉️ Postuler".to_string(),
            ticket_name_format: "candidature-{username}".to_string(),
        }
    }
}

impl GuildConfig {
    /// Fields with their 1-based display position
    pub fn list_fields(&self) -> impl Iterator<Item = (usize, &FormField)> {
        self.modal_fields.iter().enumerate().map(|(i, f)| (i + 1, f))
    }

    /// Append a question, enforcing the Discord modal limit
    pub fn add_field(&mut self, field: FormField) -> Result<(), FieldError> {
        if self.modal_fields.len() >= MAX_MODAL_FIELDS {
            return Err(FieldError::LimitReached);
        }
        self.modal_fields.push(field);
        Ok(())
    }

    pub fn field_at(&self, index: usize) -> Option<&FormField> {
        self.modal_fields.get(index)
    }

    /// Remove by display index. Out-of-range (e.g. a stale index after a
    /// concurrent delete) leaves the list untouched.
    pub fn remove_field_at(&mut self, index: usize) -> Result<FormField, FieldError> {
        if index >= self.modal_fields.len() {
            return Err(FieldError::NotFound);
        }
        Ok(self.modal_fields.remove(index))
    }

    /// Replace the question at `index` wholesale, keeping its id
    pub fn replace_field_at(
        &mut self,
        index: usize,
        mut field: FormField,
    ) -> Result<(), FieldError> {
        match self.modal_fields.get_mut(index) {
            Some(slot) => {
                field.id = slot.id.clone();
                *slot = field;
                Ok(())
            }
            None => Err(FieldError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_field(label: &str) -> FormField {
        FormField {
            id: format!("field_{}", label),
            label: label.to_string(),
            placeholder: String::new(),
            required: false,
            style: FieldStyle::Short,
            min_length: None,
            max_length: None,
        }
    }

    #[test]
    fn test_style_normalization() {
        assert_eq!(FieldStyle::parse("paragraph"), FieldStyle::Paragraph);
        assert_eq!(FieldStyle::parse("PARAGRAPH"), FieldStyle::Paragraph);
        assert_eq!(FieldStyle::parse("short"), FieldStyle::Short);
        assert_eq!(FieldStyle::parse("anything"), FieldStyle::Short);
        assert_eq!(FieldStyle::parse(""), FieldStyle::Short);
    }

    #[test]
    fn test_required_normalization() {
        assert!(parse_required("oui"));
        assert!(parse_required("Oui"));
        assert!(parse_required("OUI"));
        assert!(!parse_required("non"));
        assert!(!parse_required("yes"));
        assert!(!parse_required(""));
    }

    #[test]
    fn test_add_field_respects_limit() {
        let mut config = GuildConfig {
            modal_fields: Vec::new(),
            ..Default::default()
        };
        for i in 0..MAX_MODAL_FIELDS {
            assert_eq!(config.add_field(sample_field(&i.to_string())), Ok(()));
        }
        assert_eq!(config.modal_fields.len(), MAX_MODAL_FIELDS);

        let before = config.modal_fields.clone();
        assert_eq!(
            config.add_field(sample_field("overflow")),
            Err(FieldError::LimitReached)
        );
        assert_eq!(config.modal_fields, before);
    }

    #[test]
    fn test_remove_field_out_of_range() {
        let mut config = GuildConfig::default();
        let before = config.modal_fields.clone();
        assert_eq!(config.remove_field_at(99), Err(FieldError::NotFound));
        assert_eq!(config.modal_fields, before);
    }

    #[test]
    fn test_remove_field_shifts_order() {
        let mut config = GuildConfig {
            modal_fields: vec![sample_field("a"), sample_field("b"), sample_field("c")],
            ..Default::default()
        };
        let removed = config.remove_field_at(1).unwrap();
        assert_eq!(removed.label, "b");
        let labels: Vec<&str> = config
            .modal_fields
            .iter()
            .map(|f| f.label.as_str())
            .collect();
        assert_eq!(labels, vec!["a", "c"]);
    }

    #[test]
    fn test_replace_field_keeps_id() {
        let mut config = GuildConfig {
            modal_fields: vec![sample_field("a")],
            ..Default::default()
        };
        let original_id = config.modal_fields[0].id.clone();
        config.replace_field_at(0, sample_field("renamed")).unwrap();
        assert_eq!(config.modal_fields[0].label, "renamed");
        assert_eq!(config.modal_fields[0].id, original_id);

        assert_eq!(
            config.replace_field_at(5, sample_field("x")),
            Err(FieldError::NotFound)
        );
    }

    #[test]
    fn test_length_invariant_over_sequences() {
        let mut config = GuildConfig {
            modal_fields: Vec::new(),
            ..Default::default()
        };
        let ops: &[(bool, usize)] = &[
            (true, 0),
            (true, 0),
            (false, 0),
            (true, 0),
            (true, 0),
            (true, 0),
            (true, 0),
            (true, 0),
            (false, 7),
            (false, 2),
        ];
        for (i, &(is_add, index)) in ops.iter().enumerate() {
            if is_add {
                let _ = config.add_field(sample_field(&i.to_string()));
            } else {
                let _ = config.remove_field_at(index);
            }
            assert!(config.modal_fields.len() <= MAX_MODAL_FIELDS);
        }
    }
}
