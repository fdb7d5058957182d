use ratatui::layout::Rect;

/// Rows above the item list on the infinite scroll page.
pub const SCROLL_INTRO_ROWS: u16 = 3;

/// Split the screen into header, body, and footer.
pub fn layout_regions(area: Rect) -> (Rect, Rect, Rect) {
    let header_height = area.height.min(3);
    let footer_height = 3.min(area.height.saturating_sub(header_height));
    let header = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: header_height,
    };
    let footer = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(footer_height),
        width: area.width,
        height: footer_height,
    };
    let body = Rect {
        x: area.x,
        y: area.y + header_height,
        width: area.width,
        height: area.height.saturating_sub(header_height + footer_height),
    };
    (header, body, footer)
}

pub fn body_rect(area: Rect) -> Rect {
    layout_regions(area).1
}

/// Split the body into a fixed block of `top` rows and the rest.
pub fn split_top(body: Rect, top: u16) -> (Rect, Rect) {
    let top = top.min(body.height);
    let head = Rect { height: top, ..body };
    let rest = Rect {
        y: body.y + top,
        height: body.height - top,
        ..body
    };
    (head, rest)
}

/// Area the infinite scroll list is drawn into, for a terminal of
/// `cols` x `rows`.
pub fn scroll_list_rect(cols: u16, rows: u16) -> Rect {
    let body = body_rect(Rect {
        x: 0,
        y: 0,
        width: cols,
        height: rows,
    });
    split_top(body, SCROLL_INTRO_ROWS).1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_cover_the_screen() {
        let (header, body, footer) = layout_regions(Rect::new(0, 0, 80, 24));
        assert_eq!(header.height + body.height + footer.height, 24);
        assert_eq!(body.y, 3);
        assert_eq!(footer.y, 21);
    }

    #[test]
    fn tiny_screen_has_no_body() {
        let (_, body, _) = layout_regions(Rect::new(0, 0, 80, 4));
        assert_eq!(body.height, 0);
    }

    #[test]
    fn scroll_list_sits_below_intro() {
        let list = scroll_list_rect(80, 24);
        assert_eq!(list.y, 3 + SCROLL_INTRO_ROWS);
        assert_eq!(list.height, 18 - SCROLL_INTRO_ROWS);
    }
}
