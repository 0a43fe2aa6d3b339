use crate::consts;
use crate::game::FruitKind;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::Widget,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Logo;

impl Logo {
    const FRUIT_WIDTH: u16 = 24;
    const SNAKE_WIDTH: u16 = 28;
    const SNAKE_BODY_LENGTH: u16 = 12;
    /// One cell per fruit with a space between each
    const FRUITS_WIDTH: u16 = 9;
    const SNAKE_FRUIT_GUTTER: u16 = 2;
    const TEXT_HEIGHT: u16 = 5;
    const BLOCK_SYMBOL: char = '█';
    const FRUIT_SYMBOL: char = '●';
    pub(super) const HEIGHT: u16 = Self::TEXT_HEIGHT + 2;
    pub(super) const WIDTH: u16 = Self::FRUIT_WIDTH + Self::SNAKE_WIDTH;

    #[rustfmt::skip]
    const FRUIT: [&'static str; Self::TEXT_HEIGHT as usize] = [
         " _____            _ _   ",
         "|  ___| __ _   _ (_) |_ ",
         "| |_ | '__| | | || | __|",
         "|  _|| |  | |_| || | |_ ",
        r"|_|  |_|   \__,_||_|\__|",
    ];

    #[rustfmt::skip]
    const SNAKE: [&'static str; Self::TEXT_HEIGHT as usize] = [
         " ____              _        ",
         "/ ___| _ __   __ _| | _____ ",
        r"\___ \| '_ \ / _` | |/ / _ \",
         " ___) | | | | (_| |   <  __/",
        r"|____/|_| |_|\__,_|_|\_\___|",
    ];

    const FRUITS: [FruitKind; 5] = [
        FruitKind::Apple,
        FruitKind::Banana,
        FruitKind::Orange,
        FruitKind::Blueberry,
        FruitKind::Grape,
    ];
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([Self::WIDTH])
            .flex(Flex::Start)
            .areas(area);
        let [words_area, diagram_area] = Layout::vertical([Self::TEXT_HEIGHT, 1])
            .flex(Flex::Start)
            .spacing(1)
            .areas(area);
        let [fruit_area, snake_area] =
            Layout::horizontal([Self::FRUIT_WIDTH, Self::SNAKE_WIDTH])
                .flex(Flex::Start)
                .areas(words_area);
        Text::from_iter(Self::FRUIT)
            .style(Style::new().fg(FruitKind::Apple.color()))
            .render(fruit_area, buf);
        Text::from_iter(Self::SNAKE)
            .style(consts::TITLE_STYLE)
            .render(snake_area, buf);

        let [body_area, head_area, _, fruits_area] = Layout::horizontal([
            Constraint::Length(Self::SNAKE_BODY_LENGTH),
            Constraint::Length(1),
            Constraint::Length(Self::SNAKE_FRUIT_GUTTER),
            Constraint::Length(Self::FRUITS_WIDTH),
        ])
        .flex(Flex::Center)
        .areas(diagram_area);
        for p in body_area.positions() {
            if let Some(cell) = buf.cell_mut(p) {
                cell.set_char(Self::BLOCK_SYMBOL);
                cell.set_style(Style::new().fg(consts::SNAKE_COLOR));
            }
        }
        for p in head_area.positions() {
            if let Some(cell) = buf.cell_mut(p) {
                cell.set_char(Self::BLOCK_SYMBOL);
                cell.set_style(Style::new().fg(consts::SNAKE_HEAD_COLOR));
            }
        }
        for (p, kind) in fruits_area.positions().step_by(2).zip(Self::FRUITS) {
            if let Some(cell) = buf.cell_mut(p) {
                cell.set_char(Self::FRUIT_SYMBOL);
                cell.set_style(Style::new().fg(kind.color()));
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Instructions;

impl Instructions {
    pub(super) const HEIGHT: u16 = 6;
    pub(super) const WIDTH: u16 = 20;
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let keys = |prefix: &'static str, names: [&'static str; 4]| {
            let mut spans = vec![Span::raw(prefix)];
            for (i, k) in names.into_iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                spans.push(Span::styled(k, consts::KEY_STYLE));
            }
            Line::from(spans)
        };
        let text = Text::from_iter([
            Line::from("Move the snake with:"),
            keys("       ", ["←", "↓", "↑", "→"]),
            keys("   or: ", ["h", "j", "k", "l"]),
            keys("   or: ", ["a", "s", "w", "d"]),
            Line::from("Eat the fruit, but"),
            Line::from("don't hit yourself!"),
        ]);
        debug_assert_eq!(
            text.height(),
            usize::from(Self::HEIGHT),
            "Instructions::HEIGHT is wrong"
        );
        debug_assert_eq!(
            text.width(),
            usize::from(Self::WIDTH),
            "Instructions::WIDTH is wrong"
        );
        text.render(area, buf);
    }
}
