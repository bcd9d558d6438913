//! Escape Room rendering.
//!
//! Layout while playing: header (room, description, timer) + hotspots / escape
//! button + inventory + clues. The code prompt and the toast are popups drawn
//! on top and register their click targets last so they win hit-tests.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::actions::*;
use super::catalog::{HotspotAction, HotspotTable};
use super::notify::{NoticeKind, Notification, NotificationQueue};
use super::session::{GameSession, Phase};

pub fn render(
    session: &GameSession,
    hotspots: &HotspotTable,
    code_input: &str,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    match session.phase() {
        Phase::NotStarted => render_title(f, area, click_state),
        Phase::Playing => {
            render_room(session, hotspots, f, area, click_state);
            if session.awaiting_code() {
                render_code_prompt(code_input, f, area, click_state);
            }
        }
        Phase::Won => render_game_over(session, true, f, area, click_state),
        Phase::Lost => render_game_over(session, false, f, area, click_state),
    }

    if let Some(notice) = session.notifications().front() {
        render_toast(notice, session.notifications(), f, area, click_state);
    }
}

// ── Helpers ─────────────────────────────────────────────────

/// `m:ss`
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

fn timer_color(seconds: u32) -> Color {
    if seconds <= 30 {
        Color::Red
    } else if seconds <= 60 {
        Color::Yellow
    } else {
        Color::Green
    }
}

fn notice_color(kind: NoticeKind) -> Color {
    match kind {
        NoticeKind::ItemFound => Color::Cyan,
        NoticeKind::ClueDiscovered => Color::Yellow,
        NoticeKind::MissingItems => Color::Magenta,
        NoticeKind::WrongCode => Color::Red,
        NoticeKind::RoomEscaped => Color::Green,
    }
}

fn borders_for(area_width: u16) -> Borders {
    if is_narrow_layout(area_width) { Borders::TOP | Borders::BOTTOM } else { Borders::ALL }
}

fn panel(title: String, color: Color, borders: Borders) -> Block<'static> {
    Block::default()
        .borders(borders)
        .border_style(Style::default().fg(color))
        .title(Span::styled(title, Style::default().fg(color).add_modifier(Modifier::BOLD)))
}

/// A `width` x `height` rect centered in `area`, shrunk to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

/// A popup `width` columns wide (shrunk to fit `area`) and tall enough for
/// every wrapped row of `cl` inside `block`.
fn fit_popup(area: Rect, width: u16, block: &Block, cl: &ClickableList) -> Rect {
    let width = width.min(area.width);
    let sample = Rect::new(0, 0, width, 4);
    let inner = block.inner(sample);
    let chrome = sample.height - inner.height;
    centered(area, width, cl.visual_height(inner.width, true).saturating_add(chrome))
}

fn button_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

// ── Title ───────────────────────────────────────────────────

fn render_title(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let borders = borders_for(area.width);
    let text = Style::default().fg(Color::Gray);

    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        "Can you solve the puzzles and escape in time?",
        Style::default().fg(Color::White),
    )));
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(" • Search each room for items and clues", text)));
    cl.push(Line::from(Span::styled(" • Collect the required items to unlock the exit", text)));
    cl.push(Line::from(Span::styled(" • Enter the room's code to move on", text)));
    cl.push(Line::from(Span::styled(" • Beat the timer to escape!", text)));
    cl.push(Line::from(""));
    cl.push_clickable(Line::from(Span::styled(" [S] Start Game ", button_style())), START_GAME);

    let block = panel(" Escape Room ".into(), Color::Cyan, borders);
    let popup = fit_popup(area, 56, &block, &cl);

    let mut cs = click_state.borrow_mut();
    cl.register_targets(block.inner(popup), &mut cs, true);
    drop(cs);

    f.render_widget(
        Paragraph::new(cl.into_lines())
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        popup,
    );
}

// ── Won / Lost ──────────────────────────────────────────────

fn render_game_over(
    session: &GameSession,
    won: bool,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let borders = borders_for(area.width);
    let (title, headline, detail, again, color) = if won {
        (
            " Congratulations! ",
            "You escaped all rooms!".to_string(),
            format!("Time remaining: {}", format_time(session.time_remaining())),
            " [R] Play Again ",
            Color::Green,
        )
    } else {
        (
            " Time's Up! ",
            "You couldn't escape in time...".to_string(),
            format!(
                "Trapped in {} (room {}/{})",
                session.current_room().name,
                session.current_room_index() + 1,
                session.room_count()
            ),
            " [R] Try Again ",
            Color::Red,
        )
    };

    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        headline,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(Span::styled(detail, Style::default().fg(Color::Gray))));
    cl.push(Line::from(""));
    cl.push_clickable(Line::from(Span::styled(again, button_style())), PLAY_AGAIN);

    let block = panel(title.into(), color, borders);
    let popup = fit_popup(area, 48, &block, &cl);

    let mut cs = click_state.borrow_mut();
    cl.register_targets(block.inner(popup), &mut cs, true);
    drop(cs);

    f.render_widget(
        Paragraph::new(cl.into_lines())
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        popup,
    );
}

// ── Room ────────────────────────────────────────────────────

fn render_room(
    session: &GameSession,
    hotspots: &HotspotTable,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let borders = borders_for(area.width);
    let spots = hotspots.for_room(session.current_room_index());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(6)])
        .split(area);

    render_header(session, f, chunks[0], borders);

    if is_narrow_layout(area.width) {
        let spot_h = spots.len() as u16 + 5;
        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(spot_h),
                Constraint::Min(3),
                Constraint::Min(3),
            ])
            .split(chunks[1]);
        render_hotspots(session, hotspots, f, body[0], borders, click_state);
        render_inventory(session, f, body[1], borders);
        render_clues(session, f, body[2], borders);
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);
        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);
        render_hotspots(session, hotspots, f, columns[0], borders, click_state);
        render_inventory(session, f, side[0], borders);
        render_clues(session, f, side[1], borders);
    }
}

fn render_header(session: &GameSession, f: &mut Frame, area: Rect, borders: Borders) {
    let room = session.current_room();
    let time = session.time_remaining();

    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", room.description),
            Style::default().fg(Color::White),
        )),
        Line::from(vec![
            Span::styled(
                format!(" ⏱ {} ", format_time(time)),
                Style::default().fg(timer_color(time)).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  Room {}/{}", session.current_room_index() + 1, session.room_count()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];

    let block = panel(format!(" {} ", room.name), Color::Cyan, borders);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_hotspots(
    session: &GameSession,
    hotspots: &HotspotTable,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let spots = hotspots.for_room(session.current_room_index());

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        " Look around the room:",
        Style::default().fg(Color::DarkGray),
    )));
    for (i, spot) in spots.iter().enumerate().take(MAX_HOTSPOTS as usize) {
        let searched = match &spot.action {
            HotspotAction::Collect { item } => session.has_item(&item.id),
            HotspotAction::Discover { clue } => session.has_clue(&clue.id),
        };
        let label_style = if searched {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        let mut spans = vec![
            Span::styled(format!(" [{}] ", i + 1), button_style()),
            Span::styled(spot.label.clone(), label_style),
        ];
        if searched {
            spans.push(Span::styled(" ✓", Style::default().fg(Color::Green)));
        }
        cl.push_clickable(Line::from(spans), HOTSPOT_BASE + i as u16);
    }
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            " [E] Try to Escape",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        ATTEMPT_ESCAPE,
    );

    let block = panel(" Room View ".into(), Color::Yellow, borders);

    let mut cs = click_state.borrow_mut();
    cl.register_targets(block.inner(area), &mut cs, true);
    drop(cs);

    f.render_widget(
        Paragraph::new(cl.into_lines()).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_inventory(session: &GameSession, f: &mut Frame, area: Rect, borders: Borders) {
    let inventory = session.inventory();
    let mut lines = Vec::new();
    if inventory.is_empty() {
        lines.push(Line::from(Span::styled(
            " No items found yet...",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for item in inventory {
        lines.push(Line::from(Span::styled(
            format!(" • {}", item.name),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )));
        if !item.description.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("   {}", item.description),
                Style::default().fg(Color::Gray),
            )));
        }
    }

    let block = panel(format!(" Inventory ({}) ", inventory.len()), Color::Magenta, borders);
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_clues(session: &GameSession, f: &mut Frame, area: Rect, borders: Borders) {
    let clues = session.clues();
    let mut lines = Vec::new();
    if clues.is_empty() {
        lines.push(Line::from(Span::styled(
            " No clues discovered yet...",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for clue in clues {
        lines.push(Line::from(Span::styled(
            format!(" • {}", clue.text),
            Style::default().fg(Color::Yellow),
        )));
    }

    let block = panel(format!(" Clues ({}) ", clues.len()), Color::Blue, borders);
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

// ── Popups ──────────────────────────────────────────────────

fn render_code_prompt(
    code_input: &str,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        " You have all the required items!",
        Style::default().fg(Color::White),
    )));
    cl.push(Line::from(Span::styled(
        " Enter the code to escape this room.",
        Style::default().fg(Color::Gray),
    )));
    cl.push(Line::from(""));
    cl.push(Line::from(vec![
        Span::styled(" > ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            code_input.to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("_", Style::default().fg(Color::Cyan).add_modifier(Modifier::SLOW_BLINK)),
    ]));
    cl.push(Line::from(""));
    cl.push_clickable(Line::from(Span::styled(" [Enter] Submit Code", button_style())), SUBMIT_CODE);
    cl.push_clickable(
        Line::from(Span::styled(" [Esc] Cancel", Style::default().fg(Color::Gray))),
        CANCEL_CODE,
    );

    let block = panel(" Enter Exit Code ".into(), Color::Cyan, Borders::ALL);
    let popup = fit_popup(area, 44, &block, &cl);

    let mut cs = click_state.borrow_mut();
    cl.register_targets(block.inner(popup), &mut cs, true);
    drop(cs);

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(cl.into_lines()).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}

fn render_toast(
    notice: &Notification,
    queue: &NotificationQueue,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let color = notice_color(notice.kind);

    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        format!(" {}", notice.body),
        Style::default().fg(Color::White),
    )));
    cl.push(Line::from(""));
    let more = match queue.iter().nth(1) {
        Some(next) => format!("  next: {} ({} left)", next.title.trim_end_matches('!'), queue.len() - 1),
        None => String::new(),
    };
    cl.push_clickable(
        Line::from(vec![
            Span::styled(" [Enter] OK", button_style()),
            Span::styled(more, Style::default().fg(Color::DarkGray)),
        ]),
        DISMISS_NOTICE,
    );

    let block = panel(format!(" {} ", notice.title), color, Borders::ALL);
    let popup = fit_popup(area, 50, &block, &cl);

    let mut cs = click_state.borrow_mut();
    // Anywhere on the toast dismisses it; the OK row is registered on top.
    cs.add_click_target(popup, DISMISS_NOTICE);
    cl.register_targets(block.inner(popup), &mut cs, true);
    drop(cs);

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(cl.into_lines()).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}
