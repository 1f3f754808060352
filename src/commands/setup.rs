use poise::serenity_prelude as serenity;
use tracing::info;

use crate::features::actions::Action;
use crate::utils::config::parse_embed_color;
use crate::{Context, Error};

/// Configure le panneau de recrutement
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "ADMINISTRATOR",
    default_member_permissions = "ADMINISTRATOR"
)]
pub async fn setup(
    ctx: Context<'_>,
    #[description = "Salon où envoyer le panneau"]
    #[channel_types("Text")]
    channel: serenity::GuildChannel,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("setup outside a guild")?;
    let config = ctx.data().store.get_or_create(guild_id);

    let embed = serenity::CreateEmbed::new()
        .title(&config.embed_title)
        .description(&config.embed_description)
        .color(parse_embed_color(&config.embed_color))
        .timestamp(serenity::Timestamp::now());

    let button = serenity::CreateButton::new(Action::OpenApplication.id())
        .label(&config.button_label)
        .style(serenity::ButtonStyle::Primary);

    channel
        .send_message(
            &ctx.serenity_context().http,
            serenity::CreateMessage::new()
                .embed(embed)
                .components(vec![serenity::CreateActionRow::Buttons(vec![button])]),
        )
        .await?;

    info!("Posted recruitment panel in channel {} of guild {}", channel.id, guild_id);

    ctx.send(
        poise::CreateReply::default()
            .content(format!("✅ Panneau envoyé dans <#{}>", channel.id))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}
