use poise::serenity_prelude as serenity;

use crate::features::actions::{Action, ConfigBinding};
use crate::utils::config::parse_embed_color;
use crate::utils::formatters::truncate;
use crate::{Context, Error};

/// Long free-text fields are cut to this many characters in the summary
const SUMMARY_TEXT_LIMIT: usize = 100;

/// Affiche et modifie la configuration du bot
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "ADMINISTRATOR",
    default_member_permissions = "ADMINISTRATOR"
)]
pub async fn config(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("config outside a guild")?;
    let config = ctx.data().store.get_or_create(guild_id);

    let questions = config
        .list_fields()
        .map(|(position, field)| format!("{}. {}", position, field.label))
        .collect::<Vec<_>>()
        .join("\n");

    let embed = serenity::CreateEmbed::new()
        .title("⚙️ Configuration du Bot de Recrutement")
        .color(parse_embed_color(&config.embed_color))
        .field(
            "📁 Catégorie des tickets",
            config
                .ticket_category_id
                .map(|id| format!("<#{}>", id))
                .unwrap_or_else(|| "❌ Non défini".to_string()),
            true,
        )
        .field(
            "👥 Rôle Staff",
            config
                .staff_role_id
                .map(|id| format!("<@&{}>", id))
                .unwrap_or_else(|| "❌ Non défini".to_string()),
            true,
        )
        .field(
            "📝 Salon de logs",
            config
                .log_channel_id
                .map(|id| format!("<#{}>", id))
                .unwrap_or_else(|| "❌ Non défini".to_string()),
            true,
        )
        .field("🎨 Couleur de l'embed", &config.embed_color, true)
        .field("📋 Titre de l'embed", &config.embed_title, true)
        .field("🏷️ Label du bouton", &config.button_label, true)
        .field(
            "💬 Message de bienvenue",
            truncate(&config.welcome_message, SUMMARY_TEXT_LIMIT),
            false,
        )
        .field(
            "📝 Questions du formulaire",
            if questions.is_empty() {
                "Aucune".to_string()
            } else {
                questions
            },
            false,
        )
        .timestamp(serenity::Timestamp::now());

    let row1 = serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(Action::ConfigureBinding(ConfigBinding::Category).id())
            .label("📁 Catégorie")
            .style(serenity::ButtonStyle::Primary),
        serenity::CreateButton::new(Action::ConfigureBinding(ConfigBinding::StaffRole).id())
            .label("👥 Rôle Staff")
            .style(serenity::ButtonStyle::Primary),
        serenity::CreateButton::new(Action::ConfigureBinding(ConfigBinding::LogChannel).id())
            .label("📝 Logs")
            .style(serenity::ButtonStyle::Primary),
    ]);
    let row2 = serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(Action::ConfigureEmbed.id())
            .label("🎨 Personnaliser Embed")
            .style(serenity::ButtonStyle::Secondary),
        serenity::CreateButton::new(Action::ConfigureFields.id())
            .label("📝 Questions du formulaire")
            .style(serenity::ButtonStyle::Secondary),
        serenity::CreateButton::new(Action::ConfigureWelcome.id())
            .label("💬 Message bienvenue")
            .style(serenity::ButtonStyle::Secondary),
    ]);

    ctx.send(
        poise::CreateReply::default()
            .embed(embed)
            .components(vec![row1, row2])
            .ephemeral(true),
    )
    .await?;

    Ok(())
}
