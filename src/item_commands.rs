use std::io::Write;

use inquire::{Select, Text};

use crate::{
    api::items_client::ItemsApi,
    errors::ItemError,
    intents::{dispatch, Intent, ItemDraft, ViewSink},
    models::item_model::{Item, ItemId, CATEGORIES},
    ui::region::{render, DisplayRegion},
};

/// Prints every render of the region to `out`
pub struct TextView<W: Write> {
    pub region: DisplayRegion,
    out: W,
    error: Option<String>,
}

impl<W: Write> TextView<W> {
    pub fn new(out: W) -> Self {
        Self {
            region: DisplayRegion::new(),
            out,
            error: None,
        }
    }

    /// Turns a recorded failure into the command's result
    pub fn finish(self) -> anyhow::Result<()> {
        match self.error {
            Some(e) => Err(anyhow::anyhow!(e)),
            None => Ok(()),
        }
    }
}

impl<W: Write> ViewSink for TextView<W> {
    fn show_items(&mut self, items: Vec<Item>) {
        render(&items, &mut self.region);

        for line in self.region.to_lines() {
            if let Err(e) = writeln!(self.out, "{}", line) {
                log::error!("Writing output failed: {}", e);
                return;
            }
        }
    }

    fn reset_form(&mut self) {}

    fn show_error(&mut self, error: &ItemError) {
        self.error = Some(error.to_string());
    }
}

/// Optional values given on the command line for `create`
#[derive(Debug, Default, Clone)]
pub struct CreateArgs {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub due: Option<String>,
}

/// Fill in whatever was not given on the command line
fn prompt_draft(args: CreateArgs) -> anyhow::Result<ItemDraft> {
    let title = match args.title {
        Some(title) => title,
        None => Text::new("Title")
            .with_help_message("Title for your new item")
            .prompt()?,
    };

    let description = match args.description {
        Some(description) => description,
        None => Text::new("Description")
            .with_help_message("Optional, Enter to skip")
            .prompt()?,
    };

    let category = match args.category {
        Some(category) => category,
        None => Select::new("Category", CATEGORIES.to_vec())
            .prompt()?
            .to_string(),
    };

    let due_date = match args.due {
        Some(due) => due,
        None => Text::new("Due date")
            .with_help_message("YYYY-MM-DD or YYYY-MM-DDTHH:MM")
            .prompt()?,
    };

    Ok(ItemDraft {
        title,
        description,
        category,
        due_date,
    })
}

/// List all the items of a user
pub fn list_items<A: ItemsApi, W: Write>(
    api: &A,
    user_id: &str,
    json: bool,
    out: W,
) -> anyhow::Result<()> {
    if json {
        let user_id = user_id.trim();

        if user_id.is_empty() {
            return Ok(());
        }

        let items = api.list_items(user_id)?;

        let mut out = out;
        writeln!(out, "{}", serde_json::to_string_pretty(&items)?)?;

        return Ok(());
    }

    let mut view = TextView::new(out);

    dispatch(
        api,
        &mut view,
        Intent::Load {
            user_id: user_id.to_string(),
        },
    );

    view.finish()
}

/// Prompt user to create new item, then print the reloaded list
pub fn create_item<A: ItemsApi, W: Write>(
    api: &A,
    user_id: &str,
    args: CreateArgs,
    out: W,
) -> anyhow::Result<()> {
    let draft = prompt_draft(args)?;

    let mut view = TextView::new(out);

    dispatch(
        api,
        &mut view,
        Intent::Submit {
            user_id: user_id.to_string(),
            draft,
        },
    );

    view.finish()
}

/// Mark an item done, then print the reloaded list
pub fn mark_done<A: ItemsApi, W: Write>(
    api: &A,
    id: &str,
    user_id: &str,
    out: W,
) -> anyhow::Result<()> {
    let mut view = TextView::new(out);

    dispatch(
        api,
        &mut view,
        Intent::MarkDone {
            id: ItemId::from(id),
            user_id: user_id.to_string(),
        },
    );

    view.finish()
}

#[cfg(test)]
mod item_commands_test {
    use super::{create_item, list_items, mark_done, CreateArgs};
    use crate::{
        intents::fakes::{item, Call, FakeApi},
        models::item_model::ItemId,
        ui::region::EMPTY_MESSAGE,
    };

    #[test]
    fn test_list_prints_cards() {
        let api = FakeApi::with_items(vec![item(1, "Pay rent"), item(2, "Study")]);
        let mut out = Vec::new();

        list_items(&api, "1", false, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Pay rent  [Exam]\n"));
        assert!(text.contains("Study  [Exam]"));
        assert_eq!(text.matches("[Mark Done]").count(), 2);
    }

    #[test]
    fn test_list_empty() {
        let api = FakeApi::default();
        let mut out = Vec::new();

        list_items(&api, "1", false, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", EMPTY_MESSAGE));
    }

    #[test]
    fn test_list_json() {
        let api = FakeApi::with_items(vec![item(5, "Essay")]);
        let mut out = Vec::new();

        list_items(&api, "1", true, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["title"], "Essay");
        assert_eq!(value[0]["dueDate"], "2025-01-01T00:00:00Z");
    }

    #[test]
    fn test_list_without_user_sends_nothing() {
        let api = FakeApi::with_items(vec![item(5, "Essay")]);
        let mut json_out = Vec::new();
        let mut text_out = Vec::new();

        list_items(&api, "  ", true, &mut json_out).unwrap();
        list_items(&api, "", false, &mut text_out).unwrap();

        assert!(api.calls().is_empty());
        assert!(json_out.is_empty());
        assert!(text_out.is_empty());
    }

    #[test]
    fn test_list_failure_is_an_error() {
        let api = FakeApi {
            fail_list: true,
            ..Default::default()
        };

        let res = list_items(&api, "1", false, Vec::new());

        assert_eq!(
            res.unwrap_err().to_string(),
            "Server responded with status 500"
        );
    }

    #[test]
    fn test_create_with_flags() {
        let api = FakeApi::default();
        let args = CreateArgs {
            title: Some("Essay".to_string()),
            description: Some(String::new()),
            category: Some("finance".to_string()),
            due: Some("2025-02-01".to_string()),
        };

        create_item(&api, "4", args, Vec::new()).unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        match &calls[0] {
            Call::Create(dto) => assert_eq!(dto.category, "finance"),
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn test_create_with_blank_title_sends_nothing() {
        let api = FakeApi::default();
        let args = CreateArgs {
            title: Some("  ".to_string()),
            description: Some(String::new()),
            category: Some("Exam".to_string()),
            due: Some("2025-02-01".to_string()),
        };

        create_item(&api, "4", args, Vec::new()).unwrap();

        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_mark_done_then_reload() {
        let api = FakeApi::default();

        mark_done(&api, "42", "1", Vec::new()).unwrap();

        assert_eq!(
            api.calls(),
            vec![
                Call::MarkDone(ItemId::Number(42)),
                Call::List("1".to_string())
            ]
        );
    }
}
