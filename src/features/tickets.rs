use std::collections::HashMap;
use std::sync::Arc;

use poise::serenity_prelude as serenity;
use tracing::{debug, error, info};

use crate::features::interactions::modal_values;
use crate::models::guild::{FieldStyle, FormField, MAX_MODAL_FIELDS};
use crate::utils::config::parse_embed_color;
use crate::Data;

use super::actions::Action;

/// Delay between the close acknowledgment and the channel deletion
pub const CLOSE_DELAY_SECS: u64 = 5;

/// Derive the ticket channel name from the configured template
pub fn ticket_channel_name(format: &str, username: &str) -> String {
    format.replace("{username}", username)
}

/// Static portion of the name template, used to recognize ticket channels
pub fn ticket_marker(format: &str) -> String {
    format.replace("{username}", "")
}

/// A channel is a ticket when its name contains the template's static
/// portion. An empty marker never matches: a template that is only the
/// placeholder would otherwise claim every channel.
pub fn is_ticket_channel(channel_name: &str, name_format: &str) -> bool {
    let marker = ticket_marker(name_format);
    !marker.is_empty() && channel_name.contains(&marker)
}

/// Pair each configured question with its submitted answer, in stored
/// order. Questions with empty answers are left out of the display.
pub fn answer_fields(
    fields: &[FormField],
    answers: &HashMap<String, String>,
) -> Vec<(String, String)> {
    fields
        .iter()
        .filter_map(|field| {
            answers
                .get(&field.id)
                .filter(|value| !value.is_empty())
                .map(|value| (field.label.clone(), value.clone()))
        })
        .collect()
}

/// Panel button pressed: show the application form
pub async fn present_form(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    data: &Data,
) -> Result<(), crate::Error> {
    let guild_id = component.guild_id.ok_or("application outside a guild")?;
    let config = data.store.get_or_create(guild_id);

    // Discord rejects modals with more than 5 rows
    let rows: Vec<serenity::CreateActionRow> = config
        .modal_fields
        .iter()
        .take(MAX_MODAL_FIELDS)
        .map(|field| {
            let style = match field.style {
                FieldStyle::Short => serenity::InputTextStyle::Short,
                FieldStyle::Paragraph => serenity::InputTextStyle::Paragraph,
            };
            let mut input = serenity::CreateInputText::new(style, &field.label, &field.id)
                .required(field.required);
            if !field.placeholder.is_empty() {
                input = input.placeholder(&field.placeholder);
            }
            if let Some(min) = field.min_length {
                input = input.min_length(min);
            }
            if let Some(max) = field.max_length {
                input = input.max_length(max);
            }
            serenity::CreateActionRow::InputText(input)
        })
        .collect();

    let modal = serenity::CreateModal::new(Action::SubmitApplication.id(), "Formulaire de recrutement")
        .components(rows);

    component
        .create_response(ctx, serenity::CreateInteractionResponse::Modal(modal))
        .await?;
    Ok(())
}

/// Application form submitted: open the private ticket channel
pub async fn submit_application(
    ctx: &serenity::Context,
    modal: &serenity::ModalInteraction,
    data: &Data,
) -> Result<(), crate::Error> {
    let guild_id = modal.guild_id.ok_or("application outside a guild")?;
    let config = data.store.get_or_create(guild_id);

    let Some(category_id) = config.ticket_category_id else {
        modal
            .create_response(
                ctx,
                serenity::CreateInteractionResponse::Message(
                    serenity::CreateInteractionResponseMessage::new()
                        .content("❌ La catégorie n'est pas configurée !")
                        .ephemeral(true),
                ),
            )
            .await?;
        return Ok(());
    };

    // Channel creation can take a moment; acknowledge first
    modal
        .create_response(
            ctx,
            serenity::CreateInteractionResponse::Defer(
                serenity::CreateInteractionResponseMessage::new().ephemeral(true),
            ),
        )
        .await?;

    let user = &modal.user;
    let channel_name = ticket_channel_name(&config.ticket_name_format, &user.name);

    let mut permission_overwrites = vec![
        serenity::PermissionOverwrite {
            allow: serenity::Permissions::empty(),
            deny: serenity::Permissions::VIEW_CHANNEL,
            kind: serenity::PermissionOverwriteType::Role(serenity::RoleId::new(guild_id.get())),
        },
        serenity::PermissionOverwrite {
            allow: serenity::Permissions::VIEW_CHANNEL | serenity::Permissions::SEND_MESSAGES,
            deny: serenity::Permissions::empty(),
            kind: serenity::PermissionOverwriteType::Member(user.id),
        },
        serenity::PermissionOverwrite {
            allow: serenity::Permissions::VIEW_CHANNEL | serenity::Permissions::SEND_MESSAGES,
            deny: serenity::Permissions::empty(),
            kind: serenity::PermissionOverwriteType::Member(ctx.cache.current_user().id),
        },
    ];
    if let Some(staff_role) = config.staff_role_id {
        permission_overwrites.push(serenity::PermissionOverwrite {
            allow: serenity::Permissions::VIEW_CHANNEL | serenity::Permissions::SEND_MESSAGES,
            deny: serenity::Permissions::empty(),
            kind: serenity::PermissionOverwriteType::Role(staff_role),
        });
    }

    let builder = serenity::CreateChannel::new(&channel_name)
        .kind(serenity::ChannelType::Text)
        .category(category_id)
        .permissions(permission_overwrites);

    let channel = match guild_id.create_channel(&ctx.http, builder).await {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create ticket channel {}: {:?}", channel_name, e);
            modal
                .edit_response(
                    ctx,
                    serenity::EditInteractionResponse::new()
                        .content("❌ Impossible de créer le salon de candidature !"),
                )
                .await?;
            return Ok(());
        }
    };

    let answers = modal_values(&modal.data);

    let mut embed = serenity::CreateEmbed::new()
        .title("📋 Nouvelle candidature")
        .description(&config.welcome_message)
        .color(parse_embed_color(&config.embed_color))
        .thumbnail(user.face())
        .field("👤 Candidat", format!("<@{}>", user.id), true)
        .field("🆔 ID", user.id.to_string(), true);
    for (label, value) in answer_fields(&config.modal_fields, &answers) {
        embed = embed.field(label, value, false);
    }

    let close_button = serenity::CreateButton::new(Action::CloseTicket.id())
        .label("🔒 Fermer le ticket")
        .style(serenity::ButtonStyle::Danger);

    let mention = config
        .staff_role_id
        .map(|role| format!("<@&{}>", role))
        .unwrap_or_default();

    channel
        .send_message(
            &ctx.http,
            serenity::CreateMessage::new()
                .content(mention)
                .embed(embed)
                .components(vec![serenity::CreateActionRow::Buttons(vec![close_button])]),
        )
        .await?;

    info!(
        "Opened ticket {} ({}) for user {} in guild {}",
        channel.name, channel.id, user.id, guild_id
    );

    modal
        .edit_response(
            ctx,
            serenity::EditInteractionResponse::new()
                .content(format!("✅ Votre candidature a été créée : <#{}>", channel.id)),
        )
        .await?;
    Ok(())
}

/// Close button inside a ticket channel
pub async fn close_from_component(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    data: &Data,
) -> Result<(), crate::Error> {
    component
        .create_response(
            ctx,
            serenity::CreateInteractionResponse::Message(
                serenity::CreateInteractionResponseMessage::new().content(format!(
                    "🔒 Fermeture du ticket dans {} secondes...",
                    CLOSE_DELAY_SECS
                )),
            ),
        )
        .await?;
    schedule_close(data, ctx.http.clone(), component.channel_id);
    Ok(())
}

/// Delete `channel_id` after the close delay.
///
/// The timer is cancellable: the task handle is kept per channel so a
/// ChannelDelete arriving first (or a repeated close request) aborts it
/// instead of firing a doomed deletion.
pub fn schedule_close(data: &Data, http: Arc<serenity::Http>, channel_id: serenity::ChannelId) {
    let pending = data.pending_closes.clone();
    let handle = tokio::spawn({
        let pending = pending.clone();
        async move {
            tokio::time::sleep(std::time::Duration::from_secs(CLOSE_DELAY_SECS)).await;
            pending.remove(&channel_id);
            if let Err(e) = channel_id.delete(&http).await {
                // Channel may already be gone; nothing to surface here
                debug!("Delayed deletion of {} failed: {:?}", channel_id, e);
            }
        }
    });

    if let Some((_, previous)) = data.pending_closes.remove(&channel_id) {
        previous.abort();
    }
    data.pending_closes.insert(channel_id, handle);
}

/// A channel disappeared through another path; drop its pending timer
pub fn cancel_pending_close(data: &Data, channel_id: serenity::ChannelId) {
    if let Some((_, handle)) = data.pending_closes.remove(&channel_id) {
        handle.abort();
        debug!("Cancelled pending close for deleted channel {}", channel_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(id: &str, label: &str) -> FormField {
        FormField {
            id: id.to_string(),
            label: label.to_string(),
            placeholder: String::new(),
            required: true,
            style: FieldStyle::Short,
            min_length: None,
            max_length: None,
        }
    }

    #[test]
    fn test_ticket_channel_name_substitution() {
        assert_eq!(
            ticket_channel_name("candidature-{username}", "alice"),
            "candidature-alice"
        );
        assert_eq!(ticket_channel_name("ticket", "alice"), "ticket");
    }

    #[test]
    fn test_ticket_marker_matching() {
        assert!(is_ticket_channel(
            "candidature-alice",
            "candidature-{username}"
        ));
        assert!(!is_ticket_channel("general", "candidature-{username}"));
        // Placeholder-only template must not claim every channel
        assert!(!is_ticket_channel("anything", "{username}"));
    }

    #[test]
    fn test_answer_fields_keeps_order_and_skips_empty() {
        let fields = vec![field("a", "Âge"), field("b", "Expérience"), field("c", "Motivation")];
        let answers = HashMap::from([
            ("c".to_string(), "la motivation".to_string()),
            ("a".to_string(), "18".to_string()),
            ("b".to_string(), String::new()),
        ]);

        let rendered = answer_fields(&fields, &answers);
        assert_eq!(
            rendered,
            vec![
                ("Âge".to_string(), "18".to_string()),
                ("Motivation".to_string(), "la motivation".to_string()),
            ]
        );
    }

    #[test]
    fn test_answer_fields_ignores_unknown_answers() {
        let fields = vec![field("a", "Âge")];
        let answers = HashMap::from([("ghost".to_string(), "value".to_string())]);
        assert!(answer_fields(&fields, &answers).is_empty());
    }
}
