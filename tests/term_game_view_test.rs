use blockfall::core::{BannerKind, Cell, GameState};
use blockfall::term::{GameView, Viewport};
use blockfall::types::CLEARED_COLOR;

fn started_snapshot() -> blockfall::core::GameSnapshot {
    let mut game = GameState::new(1);
    game.start();
    game.snapshot()
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let vp = Viewport::new(22, 22);
    let fb = view.render(&snap, vp);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_cleared_row_in_cleared_color() {
    let mut snap = GameState::new(1).snapshot();
    snap.board[19] = [Cell::filled(CLEARED_COLOR); 10];

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    for x in 1..21 {
        let glyph = fb.get(x, 20).unwrap();
        assert_eq!(glyph.ch, '█');
        assert_eq!(glyph.style.fg, CLEARED_COLOR);
    }
    assert_eq!(fb.get(1, 19).unwrap().ch, '·');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = started_snapshot();
    snap.score = 1234;
    snap.level = 2;
    snap.lines = 7;
    snap.total_lines = 17;

    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let fb = view.render(&snap, vp);
    let frame = view.frame(vp);
    let panel_x = (frame.x + frame.w + 2) as usize;

    let text = |y: u16| fb.row_text(y).chars().skip(panel_x).collect::<String>();
    assert!(text(frame.y).starts_with("SCORE"));
    assert!(text(frame.y + 1).starts_with("1234"));
    assert!(text(frame.y + 4).starts_with('2'));
    assert!(text(frame.y + 7).starts_with('7'));
    assert!(text(frame.y + 10).starts_with("17"));
}

#[test]
fn term_view_omits_side_panel_when_narrow() {
    let snap = started_snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(24, 22));
    for y in 0..22 {
        assert!(!fb.row_text(y).contains("SCORE"));
    }
}

#[test]
fn term_view_overlays_banner_on_board() {
    let snap = started_snapshot();
    assert_eq!(snap.banner, Some(BannerKind::Level(1)));

    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let fb = view.render(&snap, vp);
    let frame = view.frame(vp);

    let mid = frame.y + frame.h / 2;
    assert!(fb.row_text(mid).contains("LEVEL 1"));
    assert!(!fb.row_text(mid + 3).contains("LEVEL 1"));
}

#[test]
fn term_view_shows_game_over_in_panel() {
    let mut snap = started_snapshot();
    snap.game_over = true;
    snap.banner = None;

    let fb = GameView::default().render(&snap, Viewport::new(80, 24));
    assert!((0..24).any(|y| fb.row_text(y).contains("GAME OVER")));
}
