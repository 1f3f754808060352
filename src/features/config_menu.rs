//! Interactive configuration menus: edit modals behind the /config buttons,
//! the form-question select menu and the per-question detail view.

use poise::serenity_prelude as serenity;
use tracing::info;

use crate::features::interactions::modal_values;
use crate::models::guild::{FieldError, FormField, MAX_MODAL_FIELDS};
use crate::Data;

use super::actions::{Action, ConfigBinding, FieldChoice};

fn ephemeral_message(content: impl Into<String>) -> serenity::CreateInteractionResponse {
    serenity::CreateInteractionResponse::Message(
        serenity::CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    )
}

/// Category / staff role / log channel: one-input ID modal
pub async fn open_binding_modal(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    binding: ConfigBinding,
) -> Result<(), crate::Error> {
    let (title, hint) = match binding {
        ConfigBinding::Category => ("Configurer la catégorie", "Entrez l'ID de la catégorie"),
        ConfigBinding::StaffRole => ("Configurer le rôle staff", "Entrez l'ID du rôle"),
        ConfigBinding::LogChannel => ("Configurer les logs", "Entrez l'ID du salon"),
    };

    let input = serenity::CreateInputText::new(serenity::InputTextStyle::Short, "ID", "value")
        .placeholder(hint)
        .required(true);
    let modal = serenity::CreateModal::new(Action::SubmitBinding(binding).id(), title)
        .components(vec![serenity::CreateActionRow::InputText(input)]);

    component
        .create_response(ctx, serenity::CreateInteractionResponse::Modal(modal))
        .await?;
    Ok(())
}

/// Embed appearance: 4-input modal pre-filled with current values
pub async fn open_embed_modal(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    data: &Data,
) -> Result<(), crate::Error> {
    let guild_id = component.guild_id.ok_or("config outside a guild")?;
    let config = data.store.get_or_create(guild_id);

    let rows = vec![
        serenity::CreateActionRow::InputText(
            serenity::CreateInputText::new(serenity::InputTextStyle::Short, "Titre", "title")
                .value(&config.embed_title)
                .required(true),
        ),
        serenity::CreateActionRow::InputText(
            serenity::CreateInputText::new(
                serenity::InputTextStyle::Paragraph,
                "Description",
                "description",
            )
            .value(&config.embed_description)
            .required(true),
        ),
        serenity::CreateActionRow::InputText(
            serenity::CreateInputText::new(serenity::InputTextStyle::Short, "Couleur (hex)", "color")
                .placeholder("#5865F2")
                .value(&config.embed_color)
                .required(true),
        ),
        serenity::CreateActionRow::InputText(
            serenity::CreateInputText::new(serenity::InputTextStyle::Short, "Label du bouton", "button")
                .value(&config.button_label)
                .required(true),
        ),
    ];

    let modal =
        serenity::CreateModal::new(Action::SubmitEmbed.id(), "Personnaliser l'embed").components(rows);
    component
        .create_response(ctx, serenity::CreateInteractionResponse::Modal(modal))
        .await?;
    Ok(())
}

/// Welcome message: one paragraph input pre-filled
pub async fn open_welcome_modal(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    data: &Data,
) -> Result<(), crate::Error> {
    let guild_id = component.guild_id.ok_or("config outside a guild")?;
    let config = data.store.get_or_create(guild_id);

    let input =
        serenity::CreateInputText::new(serenity::InputTextStyle::Paragraph, "Message", "message")
            .value(&config.welcome_message)
            .required(true);
    let modal = serenity::CreateModal::new(Action::SubmitWelcome.id(), "Message de bienvenue")
        .components(vec![serenity::CreateActionRow::InputText(input)]);

    component
        .create_response(ctx, serenity::CreateInteractionResponse::Modal(modal))
        .await?;
    Ok(())
}

/// Form questions: select menu listing current questions plus the add entry
pub async fn open_field_menu(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    data: &Data,
) -> Result<(), crate::Error> {
    let guild_id = component.guild_id.ok_or("config outside a guild")?;
    let config = data.store.get_or_create(guild_id);

    let mut options: Vec<serenity::CreateSelectMenuOption> = config
        .list_fields()
        .map(|(position, field)| {
            serenity::CreateSelectMenuOption::new(
                format!("{}. {}", position, field.label),
                FieldChoice::Existing(position - 1).value(),
            )
            .description(format!(
                "{} - {}",
                field.style.label_fr(),
                if field.required { "Obligatoire" } else { "Optionnel" }
            ))
        })
        .collect();

    if config.modal_fields.len() >= MAX_MODAL_FIELDS {
        options.push(
            serenity::CreateSelectMenuOption::new(
                format!("❌ Limite atteinte ({} champs max)", MAX_MODAL_FIELDS),
                FieldChoice::LimitReached.value(),
            )
            .description("Supprimez un champ pour en ajouter un nouveau"),
        );
    } else {
        options.push(
            serenity::CreateSelectMenuOption::new("➕ Ajouter un champ", FieldChoice::Add.value())
                .description("Créer une nouvelle question"),
        );
    }

    let menu = serenity::CreateSelectMenu::new(
        Action::FieldMenu.id(),
        serenity::CreateSelectMenuKind::String { options },
    )
    .placeholder("Sélectionnez un champ à modifier");

    component
        .create_response(
            ctx,
            serenity::CreateInteractionResponse::Message(
                serenity::CreateInteractionResponseMessage::new()
                    .content(format!(
                        "📝 **Gestion des questions du formulaire**\n\n⚠️ Discord limite à **{} champs maximum** par modal.",
                        MAX_MODAL_FIELDS
                    ))
                    .components(vec![serenity::CreateActionRow::SelectMenu(menu)])
                    .ephemeral(true),
            ),
        )
        .await?;
    Ok(())
}

/// A select-menu choice was made: add a question or open a detail view
pub async fn handle_field_choice(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    data: &Data,
) -> Result<(), crate::Error> {
    let guild_id = component.guild_id.ok_or("config outside a guild")?;

    let choice = match &component.data.kind {
        serenity::ComponentInteractionDataKind::StringSelect { values } => {
            values.first().and_then(|value| FieldChoice::parse(value))
        }
        _ => None,
    };

    match choice {
        Some(FieldChoice::LimitReached) => {
            component
                .create_response(
                    ctx,
                    ephemeral_message(format!(
                        "❌ Limite de {} champs atteinte !",
                        MAX_MODAL_FIELDS
                    )),
                )
                .await?;
        }
        Some(FieldChoice::Add) => {
            // The menu may be stale; re-check the cap before showing the modal
            let config = data.store.get_or_create(guild_id);
            if config.modal_fields.len() >= MAX_MODAL_FIELDS {
                component
                    .create_response(
                        ctx,
                        ephemeral_message(format!(
                            "❌ Vous avez déjà {} champs (limite Discord)",
                            MAX_MODAL_FIELDS
                        )),
                    )
                    .await?;
                return Ok(());
            }
            let modal = field_modal(Action::SubmitNewField, "Ajouter une question", None);
            component
                .create_response(ctx, serenity::CreateInteractionResponse::Modal(modal))
                .await?;
        }
        Some(FieldChoice::Existing(index)) => {
            let config = data.store.get_or_create(guild_id);
            let Some(field) = config.field_at(index) else {
                component
                    .create_response(ctx, ephemeral_message("❌ Champ introuvable !"))
                    .await?;
                return Ok(());
            };

            let buttons = vec![
                serenity::CreateButton::new(Action::EditField(index).id())
                    .label("Modifier")
                    .style(serenity::ButtonStyle::Primary),
                serenity::CreateButton::new(Action::DeleteField(index).id())
                    .label("Supprimer")
                    .style(serenity::ButtonStyle::Danger),
            ];

            component
                .create_response(
                    ctx,
                    serenity::CreateInteractionResponse::Message(
                        serenity::CreateInteractionResponseMessage::new()
                            .content(format!(
                                "**Question sélectionnée :**\n\n**Label :** {}\n**Type :** {}\n**Obligatoire :** {}",
                                field.label,
                                field.style.label_fr(),
                                if field.required { "Oui" } else { "Non" }
                            ))
                            .components(vec![serenity::CreateActionRow::Buttons(buttons)])
                            .ephemeral(true),
                    ),
                )
                .await?;
        }
        None => {}
    }
    Ok(())
}

/// Shared add/edit question modal; `existing` pre-fills the inputs
fn field_modal(action: Action, title: &str, existing: Option<&FormField>) -> serenity::CreateModal {
    let mut label = serenity::CreateInputText::new(serenity::InputTextStyle::Short, "Question", "label")
        .placeholder("Ex: Quel est votre âge ?")
        .required(true);
    let mut placeholder =
        serenity::CreateInputText::new(serenity::InputTextStyle::Short, "Placeholder", "placeholder")
            .placeholder("Ex: 18")
            .required(false);
    let mut style = serenity::CreateInputText::new(
        serenity::InputTextStyle::Short,
        "Type (short ou paragraph)",
        "style",
    )
    .placeholder("short")
    .required(true);
    let mut required = serenity::CreateInputText::new(
        serenity::InputTextStyle::Short,
        "Obligatoire ? (oui ou non)",
        "required",
    )
    .placeholder("oui")
    .required(true);

    match existing {
        Some(field) => {
            label = label.value(&field.label);
            placeholder = placeholder.value(&field.placeholder);
            style = style.value(match field.style {
                crate::models::guild::FieldStyle::Short => "short",
                crate::models::guild::FieldStyle::Paragraph => "paragraph",
            });
            required = required.value(if field.required { "oui" } else { "non" });
        }
        None => {
            style = style.value("short");
            required = required.value("oui");
        }
    }

    serenity::CreateModal::new(action.id(), title).components(vec![
        serenity::CreateActionRow::InputText(label),
        serenity::CreateActionRow::InputText(placeholder),
        serenity::CreateActionRow::InputText(style),
        serenity::CreateActionRow::InputText(required),
    ])
}

/// Edit button on the detail view
pub async fn open_field_edit_modal(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    data: &Data,
    index: usize,
) -> Result<(), crate::Error> {
    let guild_id = component.guild_id.ok_or("config outside a guild")?;
    let config = data.store.get_or_create(guild_id);

    let Some(field) = config.field_at(index) else {
        component
            .create_response(ctx, ephemeral_message("❌ Champ introuvable !"))
            .await?;
        return Ok(());
    };

    let modal = field_modal(
        Action::SubmitFieldEdit(index),
        "Modifier la question",
        Some(field),
    );
    component
        .create_response(ctx, serenity::CreateInteractionResponse::Modal(modal))
        .await?;
    Ok(())
}

/// Delete button on the detail view
pub async fn delete_field(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    data: &Data,
    index: usize,
) -> Result<(), crate::Error> {
    let guild_id = component.guild_id.ok_or("config outside a guild")?;
    let mut config = data.store.get_or_create(guild_id);

    match config.remove_field_at(index) {
        Ok(removed) => {
            data.store.set(guild_id, config);
            info!("Removed form field '{}' in guild {}", removed.label, guild_id);
            component
                .create_response(
                    ctx,
                    serenity::CreateInteractionResponse::UpdateMessage(
                        serenity::CreateInteractionResponseMessage::new()
                            .content("✅ Champ supprimé !")
                            .components(Vec::new()),
                    ),
                )
                .await?;
        }
        Err(FieldError::NotFound) | Err(FieldError::LimitReached) => {
            component
                .create_response(ctx, ephemeral_message("❌ Champ introuvable !"))
                .await?;
        }
    }
    Ok(())
}

/// ID modal submitted for category / staff role / log channel
pub async fn submit_binding(
    ctx: &serenity::Context,
    modal: &serenity::ModalInteraction,
    data: &Data,
    binding: ConfigBinding,
) -> Result<(), crate::Error> {
    let guild_id = modal.guild_id.ok_or("config outside a guild")?;
    let values = modal_values(&modal.data);
    let raw = values.get("value").map(String::as_str).unwrap_or("").trim();

    let Some(id) = raw.parse::<u64>().ok().filter(|id| *id != 0) else {
        modal
            .create_response(ctx, ephemeral_message("❌ ID invalide."))
            .await?;
        return Ok(());
    };

    let mut config = data.store.get_or_create(guild_id);
    let confirmation = match binding {
        ConfigBinding::Category => {
            config.ticket_category_id = Some(serenity::ChannelId::new(id));
            "✅ Catégorie mise à jour !"
        }
        ConfigBinding::StaffRole => {
            config.staff_role_id = Some(serenity::RoleId::new(id));
            "✅ Rôle staff mis à jour !"
        }
        ConfigBinding::LogChannel => {
            config.log_channel_id = Some(serenity::ChannelId::new(id));
            "✅ Salon de logs mis à jour !"
        }
    };
    data.store.set(guild_id, config);
    info!("Updated {:?} binding for guild {}", binding, guild_id);

    modal
        .create_response(ctx, ephemeral_message(confirmation))
        .await?;
    Ok(())
}

/// Embed appearance modal submitted: atomic 4-field replace
pub async fn submit_embed(
    ctx: &serenity::Context,
    modal: &serenity::ModalInteraction,
    data: &Data,
) -> Result<(), crate::Error> {
    let guild_id = modal.guild_id.ok_or("config outside a guild")?;
    let mut values = modal_values(&modal.data);

    let mut config = data.store.get_or_create(guild_id);
    if let Some(title) = values.remove("title") {
        config.embed_title = title;
    }
    if let Some(description) = values.remove("description") {
        config.embed_description = description;
    }
    if let Some(color) = values.remove("color") {
        config.embed_color = color;
    }
    if let Some(button) = values.remove("button") {
        config.button_label = button;
    }
    data.store.set(guild_id, config);
    info!("Updated embed appearance for guild {}", guild_id);

    modal
        .create_response(ctx, ephemeral_message("✅ Embed personnalisé !"))
        .await?;
    Ok(())
}

/// Welcome message modal submitted
pub async fn submit_welcome(
    ctx: &serenity::Context,
    modal: &serenity::ModalInteraction,
    data: &Data,
) -> Result<(), crate::Error> {
    let guild_id = modal.guild_id.ok_or("config outside a guild")?;
    let values = modal_values(&modal.data);

    let mut config = data.store.get_or_create(guild_id);
    if let Some(message) = values.get("message") {
        config.welcome_message = message.clone();
    }
    data.store.set(guild_id, config);

    modal
        .create_response(ctx, ephemeral_message("✅ Message de bienvenue mis à jour !"))
        .await?;
    Ok(())
}

fn field_from_modal(values: &std::collections::HashMap<String, String>) -> FormField {
    FormField::from_input(
        values.get("label").cloned().unwrap_or_default(),
        values.get("placeholder").cloned().unwrap_or_default(),
        values.get("style").map(String::as_str).unwrap_or(""),
        values.get("required").map(String::as_str).unwrap_or(""),
    )
}

/// Add-question modal submitted
pub async fn submit_new_field(
    ctx: &serenity::Context,
    modal: &serenity::ModalInteraction,
    data: &Data,
) -> Result<(), crate::Error> {
    let guild_id = modal.guild_id.ok_or("config outside a guild")?;
    let values = modal_values(&modal.data);

    let mut config = data.store.get_or_create(guild_id);
    match config.add_field(field_from_modal(&values)) {
        Ok(()) => {
            data.store.set(guild_id, config);
            info!("Added form field in guild {}", guild_id);
            modal
                .create_response(ctx, ephemeral_message("✅ Question ajoutée avec succès !"))
                .await?;
        }
        Err(FieldError::LimitReached) | Err(FieldError::NotFound) => {
            modal
                .create_response(
                    ctx,
                    ephemeral_message(format!(
                        "❌ Limite de {} champs atteinte !",
                        MAX_MODAL_FIELDS
                    )),
                )
                .await?;
        }
    }
    Ok(())
}

/// Edit-question modal submitted: wholesale replace at the index
pub async fn submit_field_edit(
    ctx: &serenity::Context,
    modal: &serenity::ModalInteraction,
    data: &Data,
    index: usize,
) -> Result<(), crate::Error> {
    let guild_id = modal.guild_id.ok_or("config outside a guild")?;
    let values = modal_values(&modal.data);

    let mut config = data.store.get_or_create(guild_id);
    match config.replace_field_at(index, field_from_modal(&values)) {
        Ok(()) => {
            data.store.set(guild_id, config);
            info!("Replaced form field {} in guild {}", index, guild_id);
            modal
                .create_response(ctx, ephemeral_message("✅ Question modifiée !"))
                .await?;
        }
        Err(FieldError::NotFound) | Err(FieldError::LimitReached) => {
            modal
                .create_response(ctx, ephemeral_message("❌ Champ introuvable !"))
                .await?;
        }
    }
    Ok(())
}
