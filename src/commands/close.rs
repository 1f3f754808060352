use crate::features::tickets::{self, CLOSE_DELAY_SECS};
use crate::{Context, Error};

/// Ferme le ticket de recrutement
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MANAGE_CHANNELS",
    default_member_permissions = "MANAGE_CHANNELS"
)]
pub async fn close(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("close outside a guild")?;
    let config = ctx.data().store.get_or_create(guild_id);

    let channel = ctx
        .channel_id()
        .to_channel(ctx.serenity_context())
        .await?
        .guild();
    let Some(channel) = channel else {
        ctx.send(
            poise::CreateReply::default()
                .content("❌ Cette commande ne peut être utilisée que dans un ticket !")
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    };

    if !tickets::is_ticket_channel(&channel.name, &config.ticket_name_format) {
        ctx.send(
            poise::CreateReply::default()
                .content("❌ Cette commande ne peut être utilisée que dans un ticket !")
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    ctx.say(format!(
        "🔒 Fermeture du ticket dans {} secondes...",
        CLOSE_DELAY_SECS
    ))
    .await?;

    tickets::schedule_close(
        ctx.data(),
        ctx.serenity_context().http.clone(),
        channel.id,
    );

    Ok(())
}
