mod widgets;
use self::widgets::{Instructions, Logo};
use crate::app::Screen;
use crate::command::Command;
use crate::config::Config;
use crate::consts;
use crate::game::{Game, Variant};
use crate::util::{get_display_area, EnumExt};
use crossterm::event::{read, Event};
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
    Frame,
};

/// The title screen, where the player picks a variant to play
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Menu {
    selection: Selection,
    config: Config,
}

impl Menu {
    /// Create a menu with the button for `variant` selected
    pub(crate) fn new(config: Config, variant: Variant) -> Self {
        Menu {
            selection: Selection::from(variant),
            config,
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match (
            self.selection,
            Command::from_key_event(event.as_key_press_event()?)?,
        ) {
            (_, Command::Quit | Command::Q)
            | (Selection::Quit, Command::Enter | Command::Space) => return Some(Screen::Quit),
            (_, Command::Home) => self.selection = Selection::min(),
            (_, Command::End) => self.selection = Selection::max(),
            (_, Command::Up) => {
                if let Some(sel) = self.selection.prev() {
                    self.selection = sel;
                }
            }
            (_, Command::Down) => {
                if let Some(sel) = self.selection.next() {
                    self.selection = sel;
                }
            }
            (_, Command::C) | (Selection::Classic, Command::Enter | Command::Space) => {
                return Some(self.play(Variant::Basic))
            }
            (_, Command::F) | (Selection::Fruits, Command::Enter | Command::Space) => {
                return Some(self.play(Variant::Enhanced))
            }
            _ => (),
        }
        None
    }

    fn play(&self, variant: Variant) -> Screen {
        Screen::Game(Game::new(variant, self.config.clone()))
    }
}

impl Widget for &Menu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [logo_area, instructions_area, classic_area, fruits_area, quit_area, about_area] =
            Layout::vertical([Logo::HEIGHT, Instructions::HEIGHT, 1, 1, 1, 1])
                .flex(Flex::Start)
                .spacing(1)
                .areas(display);

        let [logo_area] = Layout::horizontal([Logo::WIDTH])
            .flex(Flex::Center)
            .areas(logo_area);
        Logo.render(logo_area, buf);

        let [instructions_area] = Layout::horizontal([Instructions::WIDTH])
            .flex(Flex::Center)
            .areas(instructions_area);
        Instructions.render(instructions_area, buf);

        for (sel, button_area) in Selection::iter().zip([classic_area, fruits_area, quit_area]) {
            let style = if sel == self.selection {
                consts::MENU_SELECTION_STYLE
            } else {
                Style::new()
            };
            Line::from_iter([
                Span::styled(format!("[{} (", sel.label()), style),
                Span::styled(sel.key(), consts::KEY_STYLE.patch(style)),
                Span::styled(")]", style),
            ])
            .centered()
            .render(button_area, buf);
        }

        Line::from(self.selection.about()).centered().render(about_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
enum Selection {
    Classic,
    Fruits,
    Quit,
}

impl Selection {
    fn label(self) -> &'static str {
        match self {
            Selection::Classic => Variant::Basic.as_str(),
            Selection::Fruits => Variant::Enhanced.as_str(),
            Selection::Quit => "Quit",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Selection::Classic => "c",
            Selection::Fruits => "f",
            Selection::Quit => "q",
        }
    }

    fn about(self) -> &'static str {
        match self {
            Selection::Classic => "The walls are deadly and there is one kind of food.",
            Selection::Fruits => "The edges wrap around. Gold fruit is worth double!",
            Selection::Quit => "",
        }
    }
}

impl From<Variant> for Selection {
    fn from(variant: Variant) -> Selection {
        match variant {
            Variant::Basic => Selection::Classic,
            Variant::Enhanced => Selection::Fruits,
        }
    }
}
