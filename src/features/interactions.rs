//! Gateway event dispatch.
//!
//! Routes component and modal interactions to the ticket workflow or the
//! configuration menus, and cancels pending close timers when a channel is
//! deleted through another path. Errors escaping a handler are caught here,
//! logged, and answered with a generic notice when the interaction has not
//! been acknowledged yet.

use std::collections::HashMap;

use poise::serenity_prelude as serenity;
use tracing::error;

use crate::{Data, Error};

use super::actions::Action;
use super::{config_menu, tickets};

pub async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::InteractionCreate { interaction } => match interaction {
            serenity::Interaction::Component(component) => {
                if let Err(e) = dispatch_component(ctx, component, data).await {
                    error!(
                        "Component interaction '{}' failed: {:?}",
                        component.data.custom_id, e
                    );
                    let _ = component
                        .create_response(ctx, generic_failure())
                        .await;
                }
            }
            serenity::Interaction::Modal(modal) => {
                if let Err(e) = dispatch_modal(ctx, modal, data).await {
                    error!("Modal submit '{}' failed: {:?}", modal.data.custom_id, e);
                    let _ = modal.create_response(ctx, generic_failure()).await;
                }
            }
            _ => {}
        },
        serenity::FullEvent::ChannelDelete { channel, .. } => {
            tickets::cancel_pending_close(data, channel.id);
        }
        _ => {}
    }
    Ok(())
}

/// Shown only when the failing handler has not answered the interaction;
/// the create_response call simply errors otherwise and is dropped.
fn generic_failure() -> serenity::CreateInteractionResponse {
    serenity::CreateInteractionResponse::Message(
        serenity::CreateInteractionResponseMessage::new()
            .content("❌ Une erreur est survenue.")
            .ephemeral(true),
    )
}

async fn dispatch_component(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    data: &Data,
) -> Result<(), Error> {
    // Foreign ids (other bots' components) decode to None and are ignored
    match Action::parse(&component.data.custom_id) {
        Some(Action::OpenApplication) => tickets::present_form(ctx, component, data).await,
        Some(Action::CloseTicket) => tickets::close_from_component(ctx, component, data).await,
        Some(Action::ConfigureBinding(binding)) => {
            config_menu::open_binding_modal(ctx, component, binding).await
        }
        Some(Action::ConfigureEmbed) => config_menu::open_embed_modal(ctx, component, data).await,
        Some(Action::ConfigureWelcome) => {
            config_menu::open_welcome_modal(ctx, component, data).await
        }
        Some(Action::ConfigureFields) => config_menu::open_field_menu(ctx, component, data).await,
        Some(Action::FieldMenu) => config_menu::handle_field_choice(ctx, component, data).await,
        Some(Action::EditField(index)) => {
            config_menu::open_field_edit_modal(ctx, component, data, index).await
        }
        Some(Action::DeleteField(index)) => {
            config_menu::delete_field(ctx, component, data, index).await
        }
        _ => Ok(()),
    }
}

async fn dispatch_modal(
    ctx: &serenity::Context,
    modal: &serenity::ModalInteraction,
    data: &Data,
) -> Result<(), Error> {
    match Action::parse(&modal.data.custom_id) {
        Some(Action::SubmitApplication) => tickets::submit_application(ctx, modal, data).await,
        Some(Action::SubmitBinding(binding)) => {
            config_menu::submit_binding(ctx, modal, data, binding).await
        }
        Some(Action::SubmitEmbed) => config_menu::submit_embed(ctx, modal, data).await,
        Some(Action::SubmitWelcome) => config_menu::submit_welcome(ctx, modal, data).await,
        Some(Action::SubmitNewField) => config_menu::submit_new_field(ctx, modal, data).await,
        Some(Action::SubmitFieldEdit(index)) => {
            config_menu::submit_field_edit(ctx, modal, data, index).await
        }
        _ => Ok(()),
    }
}

/// Collect submitted text inputs as custom_id -> value
pub fn modal_values(data: &serenity::ModalInteractionData) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for row in &data.components {
        for component in &row.components {
            if let serenity::ActionRowComponent::InputText(input) = component {
                values.insert(
                    input.custom_id.clone(),
                    input.value.clone().unwrap_or_default(),
                );
            }
        }
    }
    values
}
