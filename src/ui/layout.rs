use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct SetupLayout {
    pub header_area: Rect,
    pub files_area: Rect,
    pub topics_area: Rect,
    pub settings_area: Rect,
    pub status_area: Rect,
    pub help_area: Rect,
}

pub struct ExamLayout {
    pub header_area: Rect,
    pub timer_area: Rect,
    pub question_area: Rect,
    pub options_area: Rect,
    pub status_area: Rect,
    pub help_area: Rect,
}

pub struct ResultsLayout {
    pub header_area: Rect,
    pub breakdown_area: Rect,
    pub review_area: Rect,
    pub status_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_setup_chunks(area: Rect) -> SetupLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(4)])
        .split(columns[0]);

    SetupLayout {
        header_area: chunks[0],
        files_area: left[0],
        settings_area: left[1],
        topics_area: columns[1],
        status_area: chunks[2],
        help_area: chunks[3],
    }
}

pub fn calculate_exam_chunks(area: Rect) -> ExamLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Percentage(50),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(22)])
        .split(chunks[0]);

    ExamLayout {
        header_area: header[0],
        timer_area: header[1],
        question_area: chunks[1],
        options_area: chunks[2],
        status_area: chunks[3],
        help_area: chunks[4],
    }
}

pub fn calculate_results_chunks(area: Rect) -> ResultsLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(30),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    ResultsLayout {
        header_area: chunks[0],
        breakdown_area: chunks[1],
        review_area: chunks[2],
        status_area: chunks[3],
        help_area: chunks[4],
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_layout() {
        let layout = calculate_setup_chunks(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.help_area.height, 3);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.settings_area.height, 4);
        assert!(layout.files_area.height >= 3);
        assert!(layout.topics_area.width > layout.files_area.width);
    }

    #[test]
    fn test_exam_layout() {
        let layout = calculate_exam_chunks(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.timer_area.width, 22);
        assert_eq!(layout.help_area.height, 3);
        assert!(layout.options_area.height > 0);
        assert!(layout.question_area.height >= 3);
    }

    #[test]
    fn test_results_layout() {
        let layout = calculate_results_chunks(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.help_area.height, 3);
        assert!(layout.review_area.height >= 5);
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(80, 60, area);
        assert_eq!(popup.width, 80);
        assert_eq!(popup.height, 30);
        assert_eq!(popup.x, 10);
    }
}
