//! Unit tests for the App module: start-up, status timers, deferred resize,
//! the go-to-line prompt and the line navigation keys.

use super::*;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

// ─── Helpers ─────────────────────────────────────────────────────

/// Creates an App backed by a temp file with the given content.
fn app_with_content(content: &str) -> (App, NamedTempFile) {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(content.as_bytes()).unwrap();
    tmp.flush().unwrap();
    let app = App::new(tmp.path().to_path_buf()).unwrap();
    (app, tmp)
}

fn key_event(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl_key(ch: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
}

fn char_event(ch: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))
}

fn numbered(n: usize) -> String {
    (1..=n).map(|i| format!("line {i}\n")).collect()
}

// ─── Start-up Tests ──────────────────────────────────────────────

#[test]
fn existing_file_reports_loaded() {
    let (app, tmp) = app_with_content("hello\n");
    assert_eq!(
        app.status_message,
        format!("Loaded {}", tmp.path().display())
    );
    assert!(!app.read_only);
    assert!(!app.editor.draw_mode());
}

#[test]
fn empty_file_reports_loaded_empty() {
    let (app, _tmp) = app_with_content("");
    assert!(app.status_message.starts_with("Loaded empty file: "));
    assert!(app.editor.doc().is_empty());
}

#[test]
fn missing_file_is_probed_but_not_created() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fresh.txt");
    let app = App::new(path.clone()).unwrap();
    assert_eq!(app.status_message, format!("New {}", path.display()));
    assert!(!path.exists());
}

#[test]
fn missing_icon_starts_in_draw_mode() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("favicon.ico");
    let app = App::new(path.clone()).unwrap();
    assert!(app.editor.draw_mode());
    assert_eq!(app.editor.doc().len(), codec::NEW_ICON_SIZE);
    assert!(!path.exists());
}

#[test]
fn directory_is_refused() {
    let dir = TempDir::new().unwrap();
    let result = App::new(dir.path().to_path_buf());
    assert!(matches!(result, Err(Error::IsDirectory(_))));
}

#[test]
fn uncreatable_file_is_refused() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing-dir").join("x.txt");
    assert!(App::new(path).is_err());
}

#[test]
fn line_argument_wins_over_history() {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(numbered(100).as_bytes()).unwrap();
    let mut history = LocationHistory::in_memory();
    let abs = std::path::absolute(tmp.path()).unwrap();
    history.record(&abs, 80).unwrap();

    let app = App::open(tmp.path().to_path_buf(), Config::default(), history, Some(5)).unwrap();
    assert_eq!(app.editor.data_y(), 4);
}

#[test]
fn remembered_line_is_centered() {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(numbered(100).as_bytes()).unwrap();
    let mut history = LocationHistory::in_memory();
    let abs = std::path::absolute(tmp.path()).unwrap();
    history.record(&abs, 50).unwrap();

    let app = App::open(tmp.path().to_path_buf(), Config::default(), history, None).unwrap();
    assert_eq!(app.editor.data_y(), 49);
    let view = app.editor.view();
    assert_eq!(view.row_of(49), Some(view.height() / 2));
}

#[test]
fn config_reaches_the_editor() {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(b"x").unwrap();
    let config = Config {
        tab_width: 8,
        undo_capacity: 3,
        ..Config::default()
    };
    let app = App::open(tmp.path().to_path_buf(), config, LocationHistory::in_memory(), None).unwrap();
    assert_eq!(app.editor.tab_width(), 8);
    assert_eq!(app.undo.capacity(), 3);
}

// ─── Resize Tests ────────────────────────────────────────────────

#[test]
fn resize_is_deferred_until_applied() {
    let (mut app, _tmp) = app_with_content(&numbered(50));
    let before = app.editor.view().height();
    app.handle_event(Event::Resize(80, 11));
    assert_eq!(app.editor.view().height(), before);
    assert_eq!(app.pending_resize(), Some((80, 11)));

    assert!(app.apply_pending_resize());
    assert_eq!(app.editor.view().height(), 10);
    assert!(app.needs_clear);
    assert!(!app.apply_pending_resize());
}

#[test]
fn only_the_last_resize_counts() {
    let (mut app, _tmp) = app_with_content("x");
    app.handle_event(Event::Resize(80, 40));
    app.handle_event(Event::Resize(80, 6));
    app.apply_pending_resize();
    assert_eq!(app.editor.view().height(), 5);
}

#[test]
fn shrinking_keeps_the_cursor_visible() {
    let (mut app, _tmp) = app_with_content(&numbered(50));
    for _ in 0..20 {
        app.handle_event(key_event(KeyCode::Down));
    }
    app.handle_event(Event::Resize(80, 5));
    app.apply_pending_resize();
    assert!(app.editor.view().row_of(20).is_some());
}

// ─── Status Tests ────────────────────────────────────────────────

#[test]
fn tick_clears_expired_status() {
    let (mut app, _tmp) = app_with_content("x");
    app.config.status_duration_ms = 0;
    app.set_status("hello");
    app.tick();
    assert!(app.status_message.is_empty());
    assert!(app.status_time.is_none());
}

#[test]
fn tick_keeps_fresh_status() {
    let (mut app, _tmp) = app_with_content("x");
    app.set_status("hello");
    app.tick();
    assert_eq!(app.status_message, "hello");
}

#[test]
fn sticky_status_survives_tick() {
    let (mut app, _tmp) = app_with_content("x");
    app.config.status_duration_ms = 0;
    app.set_status_sticky("waiting");
    app.tick();
    assert_eq!(app.status_message, "waiting");
}

#[test]
fn errors_are_flagged() {
    let (mut app, _tmp) = app_with_content("x");
    app.set_error(&Error::NoHistory);
    assert!(app.status_error);
    assert_eq!(app.status_message, "No more to undo");
    app.set_status("fine");
    assert!(!app.status_error);
}

#[test]
fn ctrl_g_toggles_info_mode() {
    let (mut app, tmp) = app_with_content("one two\nthree");
    app.handle_event(ctrl_key('g'));
    assert!(app.info_mode);
    let info = app.info_line();
    assert!(info.contains(&tmp.path().display().to_string()));
    assert!(info.contains("line 1, col 1"));
    assert!(info.contains("U+006F"));
    assert!(info.contains("3 words"));
    app.handle_event(ctrl_key('g'));
    assert!(!app.info_mode);
}

// ─── Go-to-line Tests ────────────────────────────────────────────

#[test]
fn ctrl_l_collects_digits_and_jumps() {
    let (mut app, _tmp) = app_with_content(&numbered(40));
    app.handle_event(ctrl_key('l'));
    assert_eq!(app.status_message, "Go to line number:");
    assert!(app.status_time.is_none());

    app.handle_event(char_event('1'));
    app.handle_event(char_event('2'));
    assert_eq!(app.status_message, "Go to line number: 12");
    app.handle_event(key_event(KeyCode::Backspace));
    app.handle_event(char_event('5'));
    assert_eq!(app.goto_line.as_deref(), Some("15"));

    app.handle_event(key_event(KeyCode::Enter));
    assert!(app.goto_line.is_none());
    assert_eq!(app.editor.data_y(), 14);
    assert!(app.status_message.is_empty());
}

#[test]
fn goto_prompt_ignores_letters_and_cancels_on_esc() {
    let (mut app, _tmp) = app_with_content(&numbered(40));
    app.handle_event(ctrl_key('l'));
    app.handle_event(char_event('x'));
    app.handle_event(char_event('9'));
    app.handle_event(key_event(KeyCode::Esc));
    assert!(app.goto_line.is_none());
    assert_eq!(app.editor.data_y(), 0);
    // the prompt did not type into the document
    assert_eq!(app.editor.doc().line(0), "line 1");
}

#[test]
fn goto_prompt_ctrl_q_cancels_without_quitting() {
    let (mut app, _tmp) = app_with_content("x");
    app.handle_event(ctrl_key('l'));
    app.handle_event(ctrl_key('q'));
    assert!(app.goto_line.is_none());
    assert!(!app.should_quit);
}

// ─── Line Navigation Tests ───────────────────────────────────────

#[test]
fn ctrl_a_cycles_text_start_and_line_start() {
    let (mut app, _tmp) = app_with_content("a\n    code");
    app.editor.set_position(1, 6);
    app.handle_event(ctrl_key('a'));
    assert_eq!(app.editor.data_x(), 4);
    app.handle_event(ctrl_key('a'));
    assert_eq!(app.editor.data_x(), 0);
    // from column 0, the previous line's end
    app.handle_event(ctrl_key('a'));
    assert_eq!((app.editor.data_y(), app.editor.data_x()), (0, 1));
}

#[test]
fn ctrl_a_after_vertical_move_stays_on_the_line() {
    let (mut app, _tmp) = app_with_content("abc\n  def");
    app.handle_event(key_event(KeyCode::Down));
    assert_eq!((app.editor.data_y(), app.editor.data_x()), (1, 0));
    app.handle_event(ctrl_key('a'));
    assert_eq!((app.editor.data_y(), app.editor.data_x()), (1, 2));
}

#[test]
fn ctrl_e_at_end_moves_to_next_line_end() {
    let (mut app, _tmp) = app_with_content("ab\ncdef");
    app.handle_event(ctrl_key('e'));
    assert_eq!((app.editor.data_y(), app.editor.data_x()), (0, 2));
    app.handle_event(ctrl_key('e'));
    assert_eq!((app.editor.data_y(), app.editor.data_x()), (1, 4));
}

#[test]
fn moving_down_past_the_view_scrolls() {
    let (mut app, _tmp) = app_with_content(&numbered(50));
    app.resize(80, 11);
    for _ in 0..12 {
        app.handle_event(key_event(KeyCode::Down));
    }
    assert_eq!(app.editor.data_y(), 12);
    assert_eq!(app.editor.view().offset(), 3);
}

// ─── Paste Tests ─────────────────────────────────────────────────

#[test]
fn bracketed_paste_uses_first_line_only() {
    let (mut app, _tmp) = app_with_content("x");
    app.editor.end();
    app.handle_event(Event::Paste("yz\nignored".to_string()));
    assert_eq!(app.editor.doc().line(0), "xyz");
    assert_eq!(app.editor.doc().len(), 1);
}

#[test]
fn paste_on_blank_line_keeps_indentation() {
    let (mut app, _tmp) = app_with_content("\t\t");
    app.handle_event(Event::Paste("  call()\u{a0}x  ".to_string()));
    assert_eq!(app.editor.doc().line(0), "\t\tcall() x");
    assert_eq!(app.editor.data_x(), 10);
}

#[test]
fn copy_then_paste_falls_back_to_the_copied_line() {
    let (mut app, _tmp) = app_with_content("  hello  \nworld");
    app.handle_event(ctrl_key('c'));
    assert_eq!(app.copy_line, "hello");
    app.handle_event(key_event(KeyCode::Down));
    app.handle_event(ctrl_key('e'));
    app.paste(None);
    assert_eq!(app.editor.doc().line(1), "worldhello");
}

#[test]
fn paste_in_draw_mode_overwrites_cells() {
    let dir = TempDir::new().unwrap();
    let mut app = App::new(dir.path().join("new.ico")).unwrap();
    app.handle_event(Event::Paste("abc".to_string()));
    assert_eq!(app.editor.doc().line_len(0), codec::NEW_ICON_SIZE);
    assert_eq!(app.editor.doc().width(), codec::NEW_ICON_SIZE);
    assert_eq!(app.editor.doc().line(0), format!("abc{}", " ".repeat(13)));
    assert_eq!(app.editor.data_x(), 3);
}

// ─── Undo Tests ──────────────────────────────────────────────────

#[test]
fn undo_after_scrolling_return_restores_the_screen_row() {
    let mut content = String::new();
    for i in 1..=30 {
        content.push_str(&format!("line {i:02}\n"));
    }
    let (mut app, _tmp) = app_with_content(&content);
    app.resize(80, 11);
    for _ in 0..9 {
        app.handle_event(key_event(KeyCode::Down));
    }
    app.handle_event(key_event(KeyCode::End));
    let before = (app.editor.data_y(), app.editor.data_x(), app.editor.screen_y());
    assert_eq!(before, (9, 7, 9));

    app.handle_event(key_event(KeyCode::Enter));
    assert_eq!(app.editor.view().offset(), 1);
    app.handle_event(ctrl_key('z'));

    let after = (app.editor.data_y(), app.editor.data_x(), app.editor.screen_y());
    assert_eq!(after, before);
    assert_eq!(app.editor.view().offset(), 0);
}

#[test]
fn no_op_keys_leave_the_undo_history_alone() {
    let (mut app, _tmp) = app_with_content("abc");
    app.handle_event(key_event(KeyCode::Backspace));
    assert!(app.undo.is_empty());

    let dir = TempDir::new().unwrap();
    let mut icon = App::new(dir.path().join("icon.png")).unwrap();
    icon.handle_event(key_event(KeyCode::Tab));
    icon.handle_event(key_event(KeyCode::Backspace));
    assert!(icon.undo.is_empty());

    icon.handle_event(key_event(KeyCode::Right));
    icon.handle_event(key_event(KeyCode::Backspace));
    assert_eq!(icon.undo.len(), 1);
}
