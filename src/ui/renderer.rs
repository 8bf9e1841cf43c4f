/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (a grid of Cells)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// This eliminates flicker caused by full-screen redraws.

use std::io::{self, BufWriter, Write};
use std::time::Instant;

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::board::{grid_coords, BOARD_CELLS, STAR_INTERVAL};
use crate::domain::rules::{is_prime, Direction};
use crate::sim::match_state::{MatchState, TurnState};
use crate::sim::session::{Phase, SessionState, MAX_PLAYERS, MIN_PLAYERS};

// ── Palette ──

const BASE_BG: Color = Color::Rgb { r: 24, g: 22, b: 20 };
const CELL_BG_A: Color = Color::Rgb { r: 64, g: 56, b: 44 };
const CELL_BG_B: Color = Color::Rgb { r: 54, g: 48, b: 38 };
const PRIME_BG: Color = Color::Rgb { r: 96, g: 58, b: 34 };
const CELL_FG: Color = Color::Rgb { r: 230, g: 216, b: 190 };
const DIM_FG: Color = Color::Rgb { r: 150, g: 134, b: 110 };
const STAR_FG: Color = Color::Rgb { r: 235, g: 180, b: 70 };
const STAR_DIM: Color = Color::Rgb { r: 120, g: 120, b: 120 };
const BOSS_FG: Color = Color::Rgb { r: 225, g: 95, b: 110 };
const LADDER_FG: Color = Color::Rgb { r: 190, g: 150, b: 90 };
const ACCENT_FG: Color = Color::Rgb { r: 240, g: 200, b: 120 };

/// Token colors, one per seat.
const TOKEN_COLORS: [Color; 6] = [
    Color::Rgb { r: 255, g: 160, b: 120 },
    Color::Rgb { r: 120, g: 200, b: 180 },
    Color::Rgb { r: 220, g: 160, b: 230 },
    Color::Rgb { r: 255, g: 220, b: 140 },
    Color::Rgb { r: 160, g: 200, b: 255 },
    Color::Rgb { r: 200, g: 240, b: 180 },
];

pub fn token_color(seat: usize) -> Color {
    TOKEN_COLORS[seat % TOKEN_COLORS.len()]
}

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    const BLANK: Cell = Cell { ch: ' ', fg: CELL_FG, bg: BASE_BG };
    /// Sentinel used to invalidate the back buffer: diffs everywhere.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Cell { ch, fg, bg });
            cx += 1;
        }
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, bg: Color) {
        for ry in y..y + h {
            for rx in x..x + w {
                self.set(rx, ry, Cell { ch: ' ', fg: CELL_FG, bg });
            }
        }
    }
}

// ── Layout ──

/// Each board cell is CELL_W x CELL_H terminal cells, last column/row
/// acting as the gap.
const CELL_W: usize = 8;
const CELL_H: usize = 3;
const BOARD_X: usize = 1;
const BOARD_Y: usize = 1;
const PANEL_X: usize = BOARD_X + 8 * CELL_W + 2;
const PANEL_W: usize = 42;

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(BASE_BG),
            Clear(ClearType::All)
        )?;
        self.sync_size();
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    fn sync_size(&mut self) {
        let (tw, th) = terminal::size().unwrap_or((100, 30));
        let (tw, th) = (tw as usize, th as usize);
        if tw != self.term_w || th != self.term_h {
            self.term_w = tw;
            self.term_h = th;
            self.front.resize(tw, th);
            self.back.resize(tw, th);
            self.back.cells.fill(Cell::INVALID);
        }
    }

    pub fn render(&mut self, s: &SessionState) -> io::Result<()> {
        self.sync_size();
        self.front.clear();

        match s.phase {
            Phase::Title => self.draw_title(s),
            Phase::Lobby => self.draw_lobby(s),
            Phase::Playing => self.draw_playing(s),
            Phase::Summary => self.draw_summary(s),
        }

        if !s.message.is_empty() {
            let y = self.term_h.saturating_sub(1);
            self.front.put_str(1, y, &s.message, ACCENT_FG, BASE_BG);
        }

        self.flush_diff()
    }

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = None;
        let mut last_bg = None;
        for y in 0..self.front.height {
            let mut x = 0;
            while x < self.front.width {
                let idx = y * self.front.width + x;
                let cell = self.front.cells[idx];
                if cell == self.back.cells[idx] {
                    x += 1;
                    continue;
                }
                queue!(self.writer, MoveTo(x as u16, y as u16))?;
                if last_fg != Some(cell.fg) {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = Some(cell.fg);
                }
                if last_bg != Some(cell.bg) {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = Some(cell.bg);
                }
                queue!(self.writer, Print(cell.ch))?;
                x += 1;
            }
        }
        self.writer.flush()?;
        std::mem::swap(&mut self.front.cells, &mut self.back.cells);
        Ok(())
    }

    // ── Title ──

    fn draw_title(&mut self, s: &SessionState) {
        let f = &mut self.front;
        f.put_str(4, 2, "S T A R P A T H", ACCENT_FG, BASE_BG);
        f.put_str(4, 3, "a board race of dice, primes and bosses", DIM_FG, BASE_BG);

        f.put_str(4, 6, "Leaderboard", CELL_FG, BASE_BG);
        f.put_str(4, 7, "name              wins  games  stars  points", DIM_FG, BASE_BG);
        let rows = s.records.leaderboard();
        if rows.is_empty() {
            f.put_str(4, 8, "(no matches recorded yet)", DIM_FG, BASE_BG);
        }
        for (i, (name, rec)) in rows.into_iter().take(10).enumerate() {
            let line = format!(
                "{:<16} {:>5} {:>6} {:>6} {:>7}",
                clip(name, 16),
                rec.wins,
                rec.games_played,
                rec.total_stars,
                rec.total_score
            );
            f.put_str(4, 8 + i, &line, CELL_FG, BASE_BG);
        }

        let y = self.term_h.saturating_sub(3);
        f.put_str(4, y, "[Enter] new match    [Q] quit", ACCENT_FG, BASE_BG);
    }

    // ── Lobby ──

    fn draw_lobby(&mut self, s: &SessionState) {
        let f = &mut self.front;
        f.put_str(4, 2, "NEW MATCH", ACCENT_FG, BASE_BG);
        f.put_str(4, 4, &format!("Players ({}-{}):", MIN_PLAYERS, MAX_PLAYERS), CELL_FG, BASE_BG);

        for (i, name) in s.roster.iter().enumerate() {
            let rec = s
                .records
                .get(name)
                .map(|r| format!("  W:{} G:{} S:{} P:{}", r.wins, r.games_played, r.total_stars, r.total_score))
                .unwrap_or_default();
            f.put_str(6, 5 + i, &format!("{}. ", i + 1), DIM_FG, BASE_BG);
            f.put_str(9, 5 + i, &clip(name, 16), token_color(i), BASE_BG);
            f.put_str(26, 5 + i, &rec, DIM_FG, BASE_BG);
        }

        let entry_y = 5 + s.roster.len() + 1;
        if s.roster.len() < MAX_PLAYERS {
            f.put_str(6, entry_y, "Name: ", CELL_FG, BASE_BG);
            f.put_str(12, entry_y, &s.name_buf, ACCENT_FG, BASE_BG);
            f.put_str(12 + s.name_buf.chars().count(), entry_y, "_", ACCENT_FG, BASE_BG);
        } else {
            f.put_str(6, entry_y, "Roster full.", DIM_FG, BASE_BG);
        }

        let y = self.term_h.saturating_sub(3);
        let hint = if s.roster.len() >= MIN_PLAYERS {
            "[Enter] add name / empty Enter starts    [Esc] back"
        } else {
            "[Enter] add name    [Esc] back"
        };
        f.put_str(4, y, hint, ACCENT_FG, BASE_BG);
    }

    // ── Playing ──

    fn draw_playing(&mut self, s: &SessionState) {
        let Some(game) = s.game.as_ref() else {
            return;
        };
        self.draw_board(game);
        self.draw_panel(s, game);
        if let TurnState::Boss { challenge, .. } = &game.turn {
            self.draw_boss_prompt(&challenge.question, &s.answer_buf, s.boss_deadline);
        }
    }

    fn draw_board(&mut self, game: &MatchState) {
        for cell in 1..=BOARD_CELLS {
            let (row, col) = grid_coords(cell);
            let x = BOARD_X + col as usize * CELL_W;
            let y = BOARD_Y + row as usize * CELL_H;

            let bg = if is_prime(cell) {
                PRIME_BG
            } else if (row + col) % 2 == 0 {
                CELL_BG_A
            } else {
                CELL_BG_B
            };
            self.front.fill_rect(x, y, CELL_W - 1, CELL_H - 1, bg);

            // line 1: number + star + boss + ladder markers
            self.front.put_str(x, y, &format!("{:>2}", cell), CELL_FG, bg);
            if cell % STAR_INTERVAL == 0 {
                let fg = if game.board.star_claimed(cell) { STAR_DIM } else { STAR_FG };
                self.front.put_str(x + 3, y, "*", fg, bg);
            }
            if game.board.is_boss(cell) {
                self.front.put_str(x + 4, y, "B", BOSS_FG, bg);
            }
            if game.board.ladder_from(cell).is_some() {
                self.front.put_str(x + 6, y, "^", LADDER_FG, bg);
            } else if game.board.ladders.iter().any(|l| l.to == cell) {
                self.front.put_str(x + 6, y, "v", LADDER_FG, bg);
            }

            // line 2: tile points + tokens
            let pts = game.board.tile_points(cell);
            if pts > 0 {
                self.front.put_str(x, y + 1, &format!("+{}", pts), DIM_FG, bg);
            } else if cell == 1 {
                self.front.put_str(x, y + 1, "GO", DIM_FG, bg);
            }
            if cell == BOARD_CELLS {
                self.front.put_str(x, y + 1, "FIN", ACCENT_FG, bg);
            }

            let mut tx = x + 4;
            for (i, p) in game.players.iter().enumerate() {
                if p.position != cell {
                    continue;
                }
                if tx >= x + CELL_W - 1 {
                    self.front.put_str(x + CELL_W - 2, y + 1, "+", CELL_FG, bg);
                    break;
                }
                let initial = p.name.chars().next().unwrap_or('?').to_ascii_uppercase();
                self.front.set(tx, y + 1, Cell { ch: initial, fg: token_color(i), bg });
                tx += 1;
            }
        }
    }

    fn draw_panel(&mut self, s: &SessionState, game: &MatchState) {
        let x = PANEL_X.min(self.term_w.saturating_sub(1));
        let f = &mut self.front;
        let mut y = BOARD_Y;

        // turn + dice
        match game.current_player() {
            Some(p) => f.put_str(x, y, &format!("Turn: {}", clip(&p.name, 20)), ACCENT_FG, BASE_BG),
            None => f.put_str(x, y, "Waiting...", DIM_FG, BASE_BG),
        }
        y += 1;
        let dice_line = match &game.turn {
            TurnState::Rolling { .. } => {
                // flicker while spinning
                format!("Dice: {}", 1 + (s.anim_tick % 6) as u8)
            }
            _ => match game.last_roll {
                Some(r) => format!(
                    "Dice: {} {}",
                    r.face,
                    match r.direction {
                        Direction::Forward => "forward",
                        Direction::Backward => "backward",
                    }
                ),
                None => "Dice: ?".to_string(),
            },
        };
        f.put_str(x, y, &dice_line, CELL_FG, BASE_BG);
        y += 2;

        // players
        for (i, p) in game.players.iter().enumerate() {
            let marker = if game.current == Some(i) { ">" } else { " " };
            let line = format!(
                "{}{:<12} @{:<2} *{:<2} {:>3}p{}",
                marker,
                clip(&p.name, 12),
                p.position,
                p.stars(),
                p.score(),
                if p.finished { " FIN" } else { "" }
            );
            f.put_str(x, y, &line, token_color(i), BASE_BG);
            y += 1;
        }
        y += 1;

        // ladders
        let ladders: Vec<String> =
            game.board.ladders.iter().map(|l| format!("{}^{}", l.from, l.to)).collect();
        f.put_str(x, y, &clip(&format!("Ladders: {}", ladders.join(" ")), PANEL_W), LADDER_FG, BASE_BG);
        y += 2;

        // log
        let log_rows = self.term_h.saturating_sub(y + 3);
        let skip = s.log.len().saturating_sub(log_rows);
        for line in s.log.iter().skip(skip) {
            f.put_str(x, y, &clip(line, PANEL_W), DIM_FG, BASE_BG);
            y += 1;
        }

        let hy = self.term_h.saturating_sub(2);
        f.put_str(x, hy, "[R] roll   [Q] quit to title", ACCENT_FG, BASE_BG);
    }

    fn draw_boss_prompt(&mut self, question: &str, answer: &str, deadline: Option<Instant>) {
        let w = 52.min(self.term_w.saturating_sub(2));
        let h = 7;
        let x = (self.term_w.saturating_sub(w)) / 2;
        let y = (self.term_h.saturating_sub(h)) / 2;
        let bg = Color::Rgb { r: 50, g: 26, b: 30 };

        self.front.fill_rect(x, y, w, h, bg);
        self.front.put_str(x + 2, y + 1, "BOSS CHALLENGE", BOSS_FG, bg);
        let secs = deadline
            .map(|d| d.saturating_duration_since(Instant::now()).as_secs())
            .unwrap_or(0);
        self.front.put_str(x + w.saturating_sub(10), y + 1, &format!("{:>2}s left", secs), ACCENT_FG, bg);
        self.front.put_str(x + 2, y + 3, &clip(question, w - 4), CELL_FG, bg);
        self.front.put_str(x + 2, y + 4, &format!("Answer: {}_", answer), ACCENT_FG, bg);
        self.front.put_str(x + 2, y + 5, "[Enter] submit   [Esc] concede", DIM_FG, bg);
    }

    // ── Summary ──

    fn draw_summary(&mut self, s: &SessionState) {
        let f = &mut self.front;
        f.put_str(4, 2, "MATCH RESULT", ACCENT_FG, BASE_BG);

        match &s.summary.winner {
            Some(name) => f.put_str(4, 4, &format!("Winner: {}", name), STAR_FG, BASE_BG),
            None => f.put_str(4, 4, "No winner.", DIM_FG, BASE_BG),
        }

        f.put_str(4, 6, "name              points  stars  total", DIM_FG, BASE_BG);
        for (i, row) in s.summary.rows.iter().enumerate() {
            let line = format!(
                "{:<16} {:>7} {:>6} {:>6}{}",
                clip(&row.name, 16),
                row.score,
                row.stars,
                row.total,
                if row.finished { "  finished" } else { "" }
            );
            f.put_str(4, 7 + i, &line, token_color(i), BASE_BG);
        }

        let y = self.term_h.saturating_sub(3);
        f.put_str(4, y, "[Enter] back to title", ACCENT_FG, BASE_BG);
    }
}

/// Truncate to a display width, appending nothing.
fn clip(s: &str, w: usize) -> String {
    s.chars().take(w).collect()
}
