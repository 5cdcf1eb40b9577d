//! Projection between data columns (rune indices) and screen columns.
//!
//! Tabs advance to the next multiple of the tab width and wide glyphs take
//! two columns, so `screen_x` is monotonic but not invertible rune-for-rune.
//! Everything here is a pure function of the line and the tab width.

use unicode_width::UnicodeWidthChar;

/// Screen columns taken by `ch` when it starts at screen column `col`.
pub fn rune_width(ch: char, col: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        tab_width - col % tab_width
    } else {
        ch.width().unwrap_or(1)
    }
}

/// Screen column of data column `data_x`. Columns past the end of the line
/// count one screen column each.
pub fn screen_x(line: &[char], data_x: usize, tab_width: usize) -> usize {
    let mut col = 0;
    for &ch in line.iter().take(data_x) {
        col += rune_width(ch, col, tab_width);
    }
    col + data_x.saturating_sub(line.len())
}

/// Data column of the rune covering `screen_x`, or the end of the line when
/// `screen_x` lies past the last rune.
pub fn data_x_at(line: &[char], screen_x: usize, tab_width: usize) -> usize {
    let mut col = 0;
    for (i, &ch) in line.iter().enumerate() {
        let width = rune_width(ch, col, tab_width);
        if col + width > screen_x {
            return i;
        }
        col += width;
    }
    line.len()
}

/// Total screen width of a line.
pub fn line_width(line: &[char], tab_width: usize) -> usize {
    screen_x(line, line.len(), tab_width)
}

/// The line as it appears on screen, with tabs expanded to spaces.
pub fn expand_tabs(line: &[char], tab_width: usize) -> String {
    let mut out = String::with_capacity(line.len());
    let mut col = 0;
    for &ch in line {
        let width = rune_width(ch, col, tab_width);
        if ch == '\t' {
            out.extend(std::iter::repeat(' ').take(width));
        } else {
            out.push(ch);
        }
        col += width;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runes(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn plain_ascii_is_linear() {
        let line = runes("hello");
        for x in 0..=5 {
            assert_eq!(screen_x(&line, x, 4), x);
        }
    }

    #[test]
    fn tab_advances_to_next_stop() {
        let line = runes("\tab\tc");
        assert_eq!(screen_x(&line, 1, 4), 4);
        assert_eq!(screen_x(&line, 3, 4), 6);
        // the second tab only needs two columns to reach column 8
        assert_eq!(screen_x(&line, 4, 4), 8);
        assert_eq!(line_width(&line, 4), 9);
    }

    #[test]
    fn tab_width_is_configurable() {
        let line = runes("\tx");
        assert_eq!(screen_x(&line, 1, 8), 8);
        assert_eq!(screen_x(&line, 1, 2), 2);
    }

    #[test]
    fn wide_glyphs_take_two_columns() {
        let line = runes("日本x");
        assert_eq!(screen_x(&line, 1, 4), 2);
        assert_eq!(screen_x(&line, 2, 4), 4);
        assert_eq!(screen_x(&line, 3, 4), 5);
    }

    #[test]
    fn columns_past_the_end_count_one_each() {
        let line = runes("ab");
        assert_eq!(screen_x(&line, 4, 4), 4);
    }

    #[test]
    fn landing_inside_a_tab_picks_the_tab() {
        let line = runes("\tab");
        assert_eq!(data_x_at(&line, 0, 4), 0);
        assert_eq!(data_x_at(&line, 2, 4), 0);
        assert_eq!(data_x_at(&line, 4, 4), 1);
        assert_eq!(data_x_at(&line, 5, 4), 2);
    }

    #[test]
    fn landing_past_the_end_snaps_to_end() {
        let line = runes("abc");
        assert_eq!(data_x_at(&line, 10, 4), 3);
        assert_eq!(data_x_at(&[], 3, 4), 0);
    }

    #[test]
    fn projection_round_trips_on_rune_boundaries() {
        let line = runes("a\tb日c");
        for x in 0..=line.len() {
            assert_eq!(data_x_at(&line, screen_x(&line, x, 4), 4), x);
        }
    }

    #[test]
    fn expand_tabs_matches_screen_width() {
        let line = runes("a\tb");
        let shown = expand_tabs(&line, 4);
        assert_eq!(shown, "a   b");
        assert_eq!(shown.chars().count(), line_width(&line, 4));
    }
}
