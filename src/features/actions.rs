//! Component and modal custom-id routing.
//!
//! Every custom id the bot emits is produced by [`Action::id`] and decoded
//! back by [`Action::parse`] at the dispatch boundary, so handlers only ever
//! see typed actions.

/// Configuration bindings edited through a single-input ID modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigBinding {
    Category,
    StaffRole,
    LogChannel,
}

impl ConfigBinding {
    fn key(&self) -> &'static str {
        match self {
            ConfigBinding::Category => "category",
            ConfigBinding::StaffRole => "staff",
            ConfigBinding::LogChannel => "logs",
        }
    }

    fn parse(key: &str) -> Option<Self> {
        match key {
            "category" => Some(ConfigBinding::Category),
            "staff" => Some(ConfigBinding::StaffRole),
            "logs" => Some(ConfigBinding::LogChannel),
            _ => None,
        }
    }
}

/// Every interactive action the bot understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Panel button: open the application form
    OpenApplication,
    /// Application modal submitted
    SubmitApplication,
    /// Close button inside a ticket channel
    CloseTicket,
    /// Config buttons
    ConfigureBinding(ConfigBinding),
    ConfigureEmbed,
    ConfigureWelcome,
    ConfigureFields,
    /// Config modals submitted
    SubmitBinding(ConfigBinding),
    SubmitEmbed,
    SubmitWelcome,
    /// Form-question select menu
    FieldMenu,
    /// Per-question detail view buttons (0-based index)
    EditField(usize),
    DeleteField(usize),
    /// Question modals submitted
    SubmitNewField,
    SubmitFieldEdit(usize),
}

impl Action {
    /// Custom id carried by the component or modal
    pub fn id(&self) -> String {
        match self {
            Action::OpenApplication => "apply".to_string(),
            Action::SubmitApplication => "application".to_string(),
            Action::CloseTicket => "ticket_close".to_string(),
            Action::ConfigureBinding(binding) => format!("config:{}", binding.key()),
            Action::ConfigureEmbed => "config:embed".to_string(),
            Action::ConfigureWelcome => "config:welcome".to_string(),
            Action::ConfigureFields => "config:fields".to_string(),
            Action::SubmitBinding(binding) => format!("edit:{}", binding.key()),
            Action::SubmitEmbed => "edit:embed".to_string(),
            Action::SubmitWelcome => "edit:welcome".to_string(),
            Action::FieldMenu => "field_select".to_string(),
            Action::EditField(index) => format!("field_edit:{}", index),
            Action::DeleteField(index) => format!("field_delete:{}", index),
            Action::SubmitNewField => "field_add".to_string(),
            Action::SubmitFieldEdit(index) => format!("field_submit:{}", index),
        }
    }

    /// Decode a custom id; foreign ids (other bots, stale components) yield None
    pub fn parse(custom_id: &str) -> Option<Action> {
        match custom_id {
            "apply" => return Some(Action::OpenApplication),
            "application" => return Some(Action::SubmitApplication),
            "ticket_close" => return Some(Action::CloseTicket),
            "config:embed" => return Some(Action::ConfigureEmbed),
            "config:welcome" => return Some(Action::ConfigureWelcome),
            "config:fields" => return Some(Action::ConfigureFields),
            "edit:embed" => return Some(Action::SubmitEmbed),
            "edit:welcome" => return Some(Action::SubmitWelcome),
            "field_select" => return Some(Action::FieldMenu),
            "field_add" => return Some(Action::SubmitNewField),
            _ => {}
        }

        if let Some(key) = custom_id.strip_prefix("config:") {
            return ConfigBinding::parse(key).map(Action::ConfigureBinding);
        }
        if let Some(key) = custom_id.strip_prefix("edit:") {
            return ConfigBinding::parse(key).map(Action::SubmitBinding);
        }
        if let Some(index) = custom_id.strip_prefix("field_edit:") {
            return index.parse().ok().map(Action::EditField);
        }
        if let Some(index) = custom_id.strip_prefix("field_delete:") {
            return index.parse().ok().map(Action::DeleteField);
        }
        if let Some(index) = custom_id.strip_prefix("field_submit:") {
            return index.parse().ok().map(Action::SubmitFieldEdit);
        }
        None
    }
}

/// Values of the form-question select menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldChoice {
    /// Existing question (0-based index)
    Existing(usize),
    Add,
    /// The relabelled "add" entry shown once the cap is reached
    LimitReached,
}

impl FieldChoice {
    pub fn value(&self) -> String {
        match self {
            FieldChoice::Existing(index) => format!("field:{}", index),
            FieldChoice::Add => "add".to_string(),
            FieldChoice::LimitReached => "limit".to_string(),
        }
    }

    pub fn parse(value: &str) -> Option<FieldChoice> {
        match value {
            "add" => Some(FieldChoice::Add),
            "limit" => Some(FieldChoice::LimitReached),
            _ => value
                .strip_prefix("field:")
                .and_then(|index| index.parse().ok())
                .map(FieldChoice::Existing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_all_actions() {
        let actions = [
            Action::OpenApplication,
            Action::SubmitApplication,
            Action::CloseTicket,
            Action::ConfigureBinding(ConfigBinding::Category),
            Action::ConfigureBinding(ConfigBinding::StaffRole),
            Action::ConfigureBinding(ConfigBinding::LogChannel),
            Action::ConfigureEmbed,
            Action::ConfigureWelcome,
            Action::ConfigureFields,
            Action::SubmitBinding(ConfigBinding::Category),
            Action::SubmitEmbed,
            Action::SubmitWelcome,
            Action::FieldMenu,
            Action::EditField(3),
            Action::DeleteField(0),
            Action::SubmitNewField,
            Action::SubmitFieldEdit(4),
        ];
        for action in actions {
            assert_eq!(Action::parse(&action.id()), Some(action));
        }
    }

    #[test]
    fn test_rejects_foreign_ids() {
        assert_eq!(Action::parse("some_other_bot"), None);
        assert_eq!(Action::parse("config:unknown"), None);
        assert_eq!(Action::parse("field_delete:xyz"), None);
        assert_eq!(Action::parse(""), None);
    }

    #[test]
    fn test_field_choice_roundtrip() {
        for choice in [
            FieldChoice::Existing(2),
            FieldChoice::Add,
            FieldChoice::LimitReached,
        ] {
            assert_eq!(FieldChoice::parse(&choice.value()), Some(choice));
        }
        assert_eq!(FieldChoice::parse("field:nope"), None);
        assert_eq!(FieldChoice::parse("other"), None);
    }
}
