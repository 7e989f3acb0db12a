use chrono::{Local, TimeZone};

use crate::{
    intents::Intent,
    models::item_model::{Badge, Item, ItemId},
    ui::app::StatefulList,
    utils::format_due_date,
};

pub const EMPTY_MESSAGE: &str = "No items yet. Add one with 'a'.";
pub const MARK_DONE_LABEL: &str = "Mark Done";

#[derive(Debug, Clone, PartialEq)]
pub struct CardHeader {
    pub title: String,
    pub category: String,
    /// Styling class, always `category-<raw value>`
    pub category_class: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardMeta {
    pub due: String,
    pub badge: Badge,
}

/// The single control in a card's footer
#[derive(Debug, Clone, PartialEq)]
pub struct CardAction {
    pub label: &'static str,
    pub item_id: ItemId,
}

impl CardAction {
    pub fn intent(&self, user_id: &str) -> Intent {
        Intent::MarkDone {
            id: self.item_id.clone(),
            user_id: user_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemCard {
    pub header: CardHeader,
    pub description: Option<String>,
    pub meta: CardMeta,
    pub footer: CardAction,
}

impl ItemCard {
    pub fn from_item<Tz>(item: &Item, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            header: CardHeader {
                title: item.title.clone(),
                category: item.category.clone(),
                category_class: format!("category-{}", item.category),
            },
            description: item.visible_description().map(String::from),
            meta: CardMeta {
                due: format_due_date(&item.due_date, tz),
                badge: item.badge(),
            },
            footer: CardAction {
                label: MARK_DONE_LABEL,
                item_id: item.id.clone(),
            },
        }
    }

    /// Plain text rendering, used outside the full screen board
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "{}  [{}]",
            self.header.title, self.header.category
        )];

        if let Some(description) = &self.description {
            lines.push(format!("    {}", description));
        }

        match self.meta.badge.label() {
            Some(badge) => lines.push(format!("    Due: {}  {}", self.meta.due, badge)),
            None => lines.push(format!("    Due: {}", self.meta.due)),
        }

        lines.push(format!(
            "    [{}]  id {}",
            self.footer.label, self.footer.item_id
        ));

        lines
    }
}

/// The area of the screen owned by the item list.
///
/// `render` overwrites it completely; nothing from a previous render
/// survives, including the selected card.
pub struct DisplayRegion {
    pub empty_message: Option<&'static str>,
    pub cards: StatefulList<ItemCard>,
}

impl DisplayRegion {
    pub fn new() -> Self {
        Self {
            empty_message: None,
            cards: StatefulList::with_items(vec![]),
        }
    }

    /// Whether any collection has been rendered yet
    pub fn is_loaded(&self) -> bool {
        self.empty_message.is_some() || !self.cards.items.is_empty()
    }

    pub fn selected_card(&self) -> Option<&ItemCard> {
        self.cards
            .state
            .selected()
            .and_then(|index| self.cards.items.get(index))
    }

    pub fn to_lines(&self) -> Vec<String> {
        if let Some(message) = self.empty_message {
            return vec![message.to_string()];
        }

        let mut lines = vec![];

        for (index, card) in self.cards.items.iter().enumerate() {
            if index > 0 {
                lines.push(String::new());
            }
            lines.extend(card.to_lines());
        }

        lines
    }
}

impl Default for DisplayRegion {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace the whole region with cards for `items`, in their given order
pub fn render(items: &[Item], region: &mut DisplayRegion) {
    render_in(items, region, &Local)
}

pub fn render_in<Tz>(items: &[Item], region: &mut DisplayRegion, tz: &Tz)
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if items.is_empty() {
        region.empty_message = Some(EMPTY_MESSAGE);
        region.cards = StatefulList::with_items(vec![]);
        return;
    }

    let cards = items
        .iter()
        .map(|item| ItemCard::from_item(item, tz))
        .collect();

    region.empty_message = None;
    region.cards = StatefulList::with_items(cards);
}
