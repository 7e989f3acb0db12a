//! Every user action is a named [`Intent`]. [`handle_intent`] turns it into
//! an ordered list of [`Effect`]s without touching the network, and
//! [`run_effects`] executes them strictly in order against an [`ItemsApi`]
//! and a [`ViewSink`].
//!
//! Ordering guarantee: an effect is only started after the previous one has
//! returned, so a reload following a mutation is always issued after the
//! mutation's response has been received.

use crate::{
    api::{dtos::item::CreateItemDTO, items_client::ItemsApi},
    errors::ItemError,
    models::item_model::{Item, ItemId},
    utils::parse_user_id,
};

/// Raw contents of the create form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub due_date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Load the collection for whatever is in the user id input
    Load { user_id: String },
    /// Submit the create form
    Submit { user_id: String, draft: ItemDraft },
    /// Activate a card's "Mark Done" control
    MarkDone { id: ItemId, user_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch { user_id: String },
    Create(CreateItemDTO),
    PatchDone(ItemId),
    ResetForm,
}

/// Where the results of effects end up
pub trait ViewSink {
    /// Hand a freshly loaded collection to the renderer
    fn show_items(&mut self, items: Vec<Item>);

    fn reset_form(&mut self);

    fn show_error(&mut self, error: &ItemError);
}

fn fetch(user_id: &str) -> Option<Effect> {
    let user_id = user_id.trim();

    if user_id.is_empty() {
        return None;
    }

    Some(Effect::Fetch {
        user_id: user_id.to_string(),
    })
}

/// Maps an intent to the effects it causes. Pure.
pub fn handle_intent(intent: Intent) -> Vec<Effect> {
    match intent {
        Intent::Load { user_id } => fetch(&user_id).into_iter().collect(),
        Intent::Submit { user_id, draft } => {
            let title = draft.title.trim();
            let due_date = draft.due_date.trim();

            let user = match parse_user_id(&user_id) {
                Some(id) if !title.is_empty() && !due_date.is_empty() => id,
                _ => {
                    log::debug!("Create form incomplete, nothing sent");
                    return vec![];
                }
            };

            let dto = CreateItemDTO {
                user_id: user,
                title: title.to_string(),
                description: draft.description.trim().to_string(),
                category: draft.category,
                due_date: due_date.to_string(),
            };

            let mut effects = vec![Effect::Create(dto), Effect::ResetForm];
            effects.extend(fetch(&user_id));
            effects
        }
        Intent::MarkDone { id, user_id } => {
            let mut effects = vec![Effect::PatchDone(id)];
            effects.extend(fetch(&user_id));
            effects
        }
    }
}

/// Runs effects in order.
///
/// A failed create stops the pipeline so the form keeps its contents. A
/// failed done-patch is only logged: the reload after it always runs.
pub fn run_effects<A, V>(api: &A, view: &mut V, effects: Vec<Effect>)
where
    A: ItemsApi + ?Sized,
    V: ViewSink + ?Sized,
{
    for effect in effects {
        match effect {
            Effect::Fetch { user_id } => match api.list_items(&user_id) {
                Ok(items) => view.show_items(items),
                Err(e) => {
                    log::error!("Loading items for user {} failed: {}", user_id, e);
                    view.show_error(&e);
                }
            },
            Effect::Create(dto) => {
                if let Err(e) = api.create_item(&dto) {
                    log::error!("Creating item failed: {}", e);
                    view.show_error(&e);
                    return;
                }
            }
            Effect::PatchDone(id) => {
                if let Err(e) = api.mark_done(&id) {
                    log::warn!("Marking item {} done failed: {}", id, e);
                }
            }
            Effect::ResetForm => view.reset_form(),
        }
    }
}

/// [`handle_intent`] followed by [`run_effects`]
pub fn dispatch<A, V>(api: &A, view: &mut V, intent: Intent)
where
    A: ItemsApi + ?Sized,
    V: ViewSink + ?Sized,
{
    let effects = handle_intent(intent);

    run_effects(api, view, effects);
}
