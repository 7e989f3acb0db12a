use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use std::time::{Duration, Instant};

use tui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::{
    api::items_client::ItemsApi,
    intents::{dispatch, Intent},
    models::item_model::Badge,
    ui::{
        app::{ActiveBlock, App, FormField, InputMode},
        region::ItemCard,
    },
};

/// Open the full screen board and auto-load the collection of `app`'s user
pub fn run_board<A: ItemsApi>(api: &A, mut app: App) -> anyhow::Result<()> {
    // setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();

    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let load = Intent::Load {
        user_id: app.user_id_input.clone(),
    };
    dispatch(api, &mut app, load);

    let tick_rate = Duration::from_millis(250);
    let res = run_app(&mut terminal, api, app, tick_rate);

    // restore terminal
    disable_raw_mode()?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    terminal.show_cursor()?;

    res.map_err(|e| e.into())
}

/// Maps a key press to the intent it stands for, applying pure navigation
/// and editing changes to `app` along the way.
/// Returns `Err(())` when the user asked to quit.
pub fn handle_key(app: &mut App, code: KeyCode) -> Result<Option<Intent>, ()> {
    match app.input_mode {
        InputMode::None => match code {
            KeyCode::Esc => app.close_error(),
            KeyCode::Char('q') => return Err(()),
            _ if app.get_current_route().active_block == ActiveBlock::Error => {}
            KeyCode::Left => app.region.cards.unselect(),
            KeyCode::Down => app.region.cards.next(),
            KeyCode::Up => app.region.cards.previous(),
            KeyCode::Char('a') => app.open_form(),
            KeyCode::Char('u') => app.open_user_input(),
            KeyCode::Char('r') => {
                return Ok(Some(Intent::Load {
                    user_id: app.user_id_input.clone(),
                }))
            }
            KeyCode::Char('d') | KeyCode::Enter => {
                if let Some(card) = app.region.selected_card() {
                    return Ok(Some(card.footer.intent(&app.user_id_input)));
                }
            }
            _ => {}
        },
        InputMode::Editing => match app.get_current_route().active_block {
            ActiveBlock::NewItem => match code {
                KeyCode::Esc => app.close_editor(),
                KeyCode::Tab | KeyCode::Down => app.form.next_field(),
                KeyCode::BackTab | KeyCode::Up => app.form.previous_field(),
                KeyCode::Right if app.form.focus == FormField::Category => {
                    app.form.next_category()
                }
                KeyCode::Left if app.form.focus == FormField::Category => {
                    app.form.previous_category()
                }
                KeyCode::Char(c) => app.form.input(c),
                KeyCode::Backspace => app.form.backspace(),
                KeyCode::Enter => {
                    return Ok(Some(Intent::Submit {
                        user_id: app.user_id_input.clone(),
                        draft: app.form.draft(),
                    }))
                }
                _ => {}
            },
            ActiveBlock::UserId => match code {
                KeyCode::Char(c) => app.user_id_input.push(c),
                KeyCode::Backspace => {
                    app.user_id_input.pop();
                }
                KeyCode::Esc => app.close_editor(),
                KeyCode::Enter => {
                    app.close_editor();
                    return Ok(Some(Intent::Load {
                        user_id: app.user_id_input.clone(),
                    }));
                }
                _ => {}
            },
            _ => app.input_mode = InputMode::None,
        },
    }

    Ok(None)
}

fn run_app<B: Backend, A: ItemsApi>(
    terminal: &mut Terminal<B>,
    api: &A,
    mut app: App,
    tick_rate: Duration,
) -> std::io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui(f, &mut app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if crossterm::event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match handle_key(&mut app, key.code) {
                    Err(()) => return Ok(()),
                    Ok(Some(intent)) => {
                        log::debug!("Dispatching {:?}", intent);
                        dispatch(api, &mut app, intent);
                    }
                    Ok(None) => {}
                }
            }
        }
        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }
}

/// Colour for a `category-<value>` class; unknown categories stay neutral
pub fn category_style(class: &str) -> Style {
    let value = class.strip_prefix("category-").unwrap_or(class);

    let color = match value.to_ascii_lowercase().as_str() {
        "assignment" => Color::Rgb(0x66, 0x7e, 0xea),
        "exam" => Color::Rgb(0xdc, 0x35, 0x45),
        "quiz" => Color::Rgb(0x28, 0xa7, 0x45),
        "meeting" => Color::Rgb(0x17, 0xa2, 0xb8),
        "presentation" => Color::Rgb(0xfd, 0x7e, 0x14),
        _ => Color::Gray,
    };

    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn urgency_style(badge: Badge) -> Style {
    match badge {
        Badge::DueSoon => Style::default().fg(Color::Yellow),
        Badge::Overdue => Style::default().fg(Color::Red),
        Badge::None => Style::default().fg(Color::DarkGray),
    }
}

fn card_item(card: &ItemCard, width: u16) -> ListItem<'_> {
    let bar = Span::styled("▌ ", urgency_style(card.meta.badge));

    let mut lines = vec![Spans::from(vec![
        bar.clone(),
        Span::styled(
            card.header.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", card.header.category),
            category_style(&card.header.category_class),
        ),
    ])];

    if let Some(description) = &card.description {
        lines.push(Spans::from(vec![
            bar.clone(),
            Span::styled(description.as_str(), Style::default().fg(Color::Gray)),
        ]));
    }

    let mut meta = vec![bar.clone(), Span::raw(format!("Due: {}", card.meta.due))];
    if let Some(label) = card.meta.badge.label() {
        meta.push(Span::raw("  "));
        meta.push(Span::styled(
            label,
            urgency_style(card.meta.badge).add_modifier(Modifier::BOLD),
        ));
    }
    lines.push(Spans::from(meta));

    lines.push(Spans::from(vec![
        bar,
        Span::styled(
            format!("[ {} ]", card.footer.label),
            Style::default().fg(Color::LightGreen),
        ),
    ]));
    lines.push(Spans::from("-".repeat(width as usize)));

    ListItem::new(lines)
}

fn draw_home_content<B: Backend>(f: &mut Frame<B>, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Items for user {}", app.user_id_input));

    if !app.region.is_loaded() || app.region.empty_message.is_some() {
        let message = app.region.empty_message.unwrap_or("Loading...");

        let paragraph = Paragraph::new(message)
            .alignment(Alignment::Center)
            .block(block);

        f.render_widget(paragraph, area);
        return;
    }

    let width = area.width.saturating_sub(2);
    let items: Vec<ListItem> = app
        .region
        .cards
        .items
        .iter()
        .map(|card| card_item(card, width))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, area, &mut app.region.cards.state);
}

fn input_box<'a>(title: &'a str, value: String, focused: bool) -> Paragraph<'a> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    Paragraph::new(value)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title))
}

fn draw_new_item_content<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);

    let prompt_message = vec![
        Span::raw("New item. "),
        Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" next field, "),
        Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" to add, "),
        Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" to cancel"),
    ];

    f.render_widget(
        Paragraph::new(Text::from(Spans::from(prompt_message))),
        chunks[0],
    );

    let form = &app.form;
    f.render_widget(
        input_box("Title", form.title.clone(), form.focus == FormField::Title),
        chunks[1],
    );
    f.render_widget(
        input_box(
            "Description",
            form.description.clone(),
            form.focus == FormField::Description,
        ),
        chunks[2],
    );
    f.render_widget(
        input_box(
            "Category",
            format!("< {} >", form.category()),
            form.focus == FormField::Category,
        ),
        chunks[3],
    );
    f.render_widget(
        input_box(
            "Due date (YYYY-MM-DD or YYYY-MM-DDTHH:MM)",
            form.due_date.clone(),
            form.focus == FormField::DueDate,
        ),
        chunks[4],
    );
}

fn draw_user_id_content<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    f.render_widget(
        input_box("User id (Enter to load)", app.user_id_input.clone(), true),
        chunks[0],
    );
}

// Draws Error if occured
fn draw_error_content<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let error_text = vec![Spans::from(vec![
        Span::raw("Error Occured: "),
        Span::styled(&app.error_message, Style::default().fg(Color::Red)),
    ])];

    let error_paragraph = Paragraph::new(error_text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled("Error (Esc to close)", Style::default().fg(Color::Red)))
            .border_style(Style::default().fg(Color::LightRed)),
    );

    f.render_widget(error_paragraph, area);
}

fn draw_status_line<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let status = Spans::from(vec![
        Span::styled(app.api_url.as_str(), Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::raw("q quit  r reload  u user  a add  d mark done"),
    ]);

    f.render_widget(Paragraph::new(status), area);
}

pub fn ui<B: Backend>(f: &mut Frame<B>, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.size());

    match app.get_current_route().active_block {
        ActiveBlock::Home => draw_home_content(f, app, chunks[0]),
        ActiveBlock::Error => draw_error_content(f, app, chunks[0]),
        ActiveBlock::NewItem => draw_new_item_content(f, app, chunks[0]),
        ActiveBlock::UserId => draw_user_id_content(f, app, chunks[0]),
    }

    draw_status_line(f, app, chunks[1]);
}

#[cfg(test)]
mod item_board_test {
    use crossterm::event::KeyCode;
    use tui::{backend::TestBackend, Terminal};

    use super::{category_style, handle_key, ui};
    use crate::{
        intents::{
            dispatch,
            fakes::{item, Call, FakeApi},
            Intent,
        },
        models::item_model::ItemId,
        ui::app::{ActiveBlock, App},
    };

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 20)).unwrap();

        terminal.draw(|f| ui(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol.as_str()).collect::<String>())
            .collect::<Vec<String>>()
            .join("\n")
    }

    #[test]
    fn test_draws_cards() {
        let mut overdue = item(1, "Pay rent");
        overdue.badge = Some(crate::models::item_model::Badge::Overdue);
        let api = FakeApi::with_items(vec![overdue, item(2, "Study")]);
        let mut app = App::new("1", "localhost:8080");

        dispatch(&api, &mut app, Intent::Load { user_id: "1".to_string() });
        let text = screen(&mut app);

        assert!(text.contains("Items for user 1"));
        assert!(text.contains("Pay rent"));
        assert!(text.contains("OVERDUE!"));
        assert!(text.contains("Study"));
        assert_eq!(text.matches("[ Mark Done ]").count(), 2);
    }

    #[test]
    fn test_draws_empty_state() {
        let api = FakeApi::default();
        let mut app = App::new("1", "localhost:8080");

        assert!(screen(&mut app).contains("Loading..."));

        dispatch(&api, &mut app, Intent::Load { user_id: "1".to_string() });

        let text = screen(&mut app);
        assert!(text.contains("No items yet."));
        assert!(!text.contains("Mark Done ]"));
    }

    #[test]
    fn test_mark_done_key_dispatches_selected_card() {
        let api = FakeApi::with_items(vec![item(42, "Essay")]);
        let mut app = App::new("1", "localhost:8080");
        dispatch(&api, &mut app, Intent::Load { user_id: "1".to_string() });

        // nothing selected yet
        assert_eq!(handle_key(&mut app, KeyCode::Char('d')), Ok(None));

        handle_key(&mut app, KeyCode::Down).unwrap();
        let intent = handle_key(&mut app, KeyCode::Char('d')).unwrap().unwrap();
        dispatch(&api, &mut app, intent);

        assert_eq!(
            api.calls()[1..].to_vec(),
            vec![
                Call::MarkDone(ItemId::Number(42)),
                Call::List("1".to_string())
            ]
        );
    }

    #[test]
    fn test_user_id_input_loads() {
        let mut app = App::new("1", "localhost:8080");

        handle_key(&mut app, KeyCode::Char('u')).unwrap();
        assert_eq!(app.get_current_route().active_block, ActiveBlock::UserId);
        handle_key(&mut app, KeyCode::Backspace).unwrap();
        handle_key(&mut app, KeyCode::Char('7')).unwrap();
        let intent = handle_key(&mut app, KeyCode::Enter).unwrap();

        assert_eq!(
            intent,
            Some(Intent::Load {
                user_id: "7".to_string()
            })
        );
        assert_eq!(app.get_current_route().active_block, ActiveBlock::Home);
    }

    #[test]
    fn test_form_submit_and_quit() {
        let api = FakeApi::default();
        let mut app = App::new("3", "localhost:8080");

        handle_key(&mut app, KeyCode::Char('a')).unwrap();
        for c in "Quiz prep".chars() {
            handle_key(&mut app, KeyCode::Char(c)).unwrap();
        }
        handle_key(&mut app, KeyCode::Tab).unwrap();
        handle_key(&mut app, KeyCode::Tab).unwrap();
        handle_key(&mut app, KeyCode::Right).unwrap();
        handle_key(&mut app, KeyCode::Tab).unwrap();
        for c in "2025-06-01".chars() {
            handle_key(&mut app, KeyCode::Char(c)).unwrap();
        }

        // 'q' is text while editing
        assert_eq!(handle_key(&mut app, KeyCode::Char('q')), Ok(None));
        handle_key(&mut app, KeyCode::Backspace).unwrap();

        let intent = handle_key(&mut app, KeyCode::Enter).unwrap().unwrap();
        dispatch(&api, &mut app, intent);

        match &api.calls()[0] {
            Call::Create(dto) => {
                assert_eq!(dto.title, "Quiz prep");
                assert_eq!(dto.category, "Exam");
                assert_eq!(dto.due_date, "2025-06-01");
                assert_eq!(dto.user_id, 3);
            }
            other => panic!("unexpected call {:?}", other),
        }
        assert_eq!(app.get_current_route().active_block, ActiveBlock::Home);
        assert_eq!(handle_key(&mut app, KeyCode::Char('q')), Err(()));
    }

    #[test]
    fn test_failed_create_returns_to_form() {
        let api = FakeApi {
            items: vec![item(42, "Essay")],
            fail_create: true,
            ..Default::default()
        };
        let mut app = App::new("1", "localhost:8080");
        dispatch(&api, &mut app, Intent::Load { user_id: "1".to_string() });
        handle_key(&mut app, KeyCode::Down).unwrap();

        handle_key(&mut app, KeyCode::Char('a')).unwrap();
        handle_key(&mut app, KeyCode::Char('x')).unwrap();
        handle_key(&mut app, KeyCode::Tab).unwrap();
        handle_key(&mut app, KeyCode::Tab).unwrap();
        handle_key(&mut app, KeyCode::Tab).unwrap();
        for c in "2025-06-01".chars() {
            handle_key(&mut app, KeyCode::Char(c)).unwrap();
        }
        let intent = handle_key(&mut app, KeyCode::Enter).unwrap().unwrap();
        dispatch(&api, &mut app, intent);
        assert_eq!(app.get_current_route().active_block, ActiveBlock::Error);

        // keys other than Esc and q do nothing on the error view
        assert_eq!(handle_key(&mut app, KeyCode::Char('d')), Ok(None));

        handle_key(&mut app, KeyCode::Esc).unwrap();
        handle_key(&mut app, KeyCode::Tab).unwrap();
        assert_eq!(handle_key(&mut app, KeyCode::Char('d')), Ok(None));
        assert_eq!(handle_key(&mut app, KeyCode::Char('q')), Ok(None));

        assert_eq!(app.get_current_route().active_block, ActiveBlock::NewItem);
        assert_eq!(app.form.title, "xdq");
        assert_eq!(app.form.due_date, "2025-06-01");
        assert!(!api
            .calls()
            .iter()
            .any(|call| matches!(call, Call::MarkDone(_))));
    }

    #[test]
    fn test_unknown_category_is_neutral() {
        assert_eq!(
            category_style("category-finance"),
            category_style("category-whatever")
        );
        assert_ne!(
            category_style("category-Exam"),
            category_style("category-finance")
        );
    }
}
