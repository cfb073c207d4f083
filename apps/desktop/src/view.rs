use iced::widget::{
    Column, button, center, column, container, image, mouse_area, opaque, row, scrollable, stack,
    text, text_input,
};
use iced::{Alignment, Color, Element, Length, Theme};
use videoinsight_core::{
    AnalysisResult, BackendStatus, FileEntry, Msg, OutputOption, file_entries, format_date,
};

use crate::{App, Message};

const SIDEBAR_WIDTH: f32 = 320.0;

type ButtonStyle = fn(&Theme, button::Status) -> button::Style;

impl App {
    pub(crate) fn view(&self) -> Element<'_, Message> {
        let page = column![
            self.view_header(),
            self.view_hero(),
            self.view_input(),
            view_separator(),
            self.view_results(),
        ]
        .spacing(28)
        .padding(24)
        .max_width(1000);

        let mut layers = stack![
            scrollable(container(page).width(Length::Fill).center_x(Length::Fill))
                .height(Length::Fill)
        ];

        if self.state.history_open {
            layers = layers.push(self.view_history_sidebar());
        }
        if let Some(alert) = &self.state.alert {
            layers = layers.push(view_alert(alert));
        }

        layers.into()
    }

    fn view_header(&self) -> Element<'_, Message> {
        let (status_text, status_color) = match &self.state.backend {
            BackendStatus::Unknown => ("Checking backend...".to_string(), GREY),
            BackendStatus::Healthy => ("Backend ready".to_string(), GREEN),
            BackendStatus::Unhealthy(reason) => (format!("Backend degraded: {reason}"), AMBER),
            BackendStatus::Unreachable => ("Backend unreachable".to_string(), RED),
        };

        let theme_label = if self.state.dark_mode { "☀ Light" } else { "🌙 Dark" };

        row![
            column![
                text("VideoInsight AI").size(24),
                text("Professional Video Analysis").size(12).style(text::secondary),
            ]
            .width(Length::Fill),
            text(status_text).size(12).color(status_color),
            button(text(theme_label).size(14))
                .style(button::secondary)
                .on_press(Message::Core(Msg::ToggleDarkMode)),
            button(text("☰ History").size(14))
                .style(button::secondary)
                .on_press(Message::Core(Msg::OpenHistory)),
        ]
        .spacing(12)
        .align_y(Alignment::Center)
        .into()
    }

    fn view_hero(&self) -> Element<'_, Message> {
        column![
            text("Transform Videos into Actionable Knowledge").size(36),
            text(
                "Generate extensive summaries, transcriptions, and didactic guides from any \
                 YouTube video.",
            )
            .size(16)
            .style(text::secondary),
        ]
        .spacing(8)
        .into()
    }

    fn view_input(&self) -> Element<'_, Message> {
        let form = &self.state.form;

        let mut url_input = text_input("Paste YouTube Video URL here...", &form.url)
            .on_input(|url| Message::Core(Msg::UrlChanged(url)))
            .padding(14)
            .size(18);
        if self.state.can_submit() {
            url_input = url_input.on_submit(Message::Core(Msg::SubmitClicked));
        }

        let mut content = column![url_input].spacing(16);
        if let Some(hint) = &form.hint {
            content = content.push(text(hint).size(13).style(text::danger));
        }

        let cards: Vec<Element<'_, Message>> = OutputOption::ALL
            .into_iter()
            .map(|option| self.view_option_card(option))
            .collect();
        let mut cards = cards.into_iter();
        while let Some(first) = cards.next() {
            let mut pair = row![first].spacing(12);
            if let Some(second) = cards.next() {
                pair = pair.push(second);
            }
            content = content.push(pair);
        }

        let submit_label = if self.state.loading {
            "Analyzing Video..."
        } else {
            "Analyze Video →"
        };
        let submit = button(text(submit_label).size(18))
            .width(Length::Fill)
            .padding(14)
            .style(button::primary)
            .on_press_maybe(
                self.state
                    .can_submit()
                    .then_some(Message::Core(Msg::SubmitClicked)),
            );

        let mut actions = row![submit].spacing(12);
        if self.state.loading {
            actions = actions.push(
                button(text("Cancel").size(18))
                    .padding(14)
                    .style(button::danger)
                    .on_press(Message::Core(Msg::CancelAnalysis)),
            );
        }
        content = content.push(actions);

        container(content)
            .padding(28)
            .width(Length::Fill)
            .style(container::rounded_box)
            .into()
    }

    fn view_option_card(&self, option: OutputOption) -> Element<'_, Message> {
        let selected = self.state.form.selection.contains(option);
        let style: ButtonStyle = if selected {
            button::primary
        } else {
            button::secondary
        };
        let marker = if selected { "☑" } else { "☐" };

        button(
            column![
                text(format!("{marker} {}", option.label())).size(15),
                text(option.description()).size(12),
            ]
            .spacing(4),
        )
        .width(Length::Fill)
        .padding(14)
        .style(style)
        .on_press(Message::Core(Msg::OptionToggled(option)))
        .into()
    }

    fn view_results(&self) -> Element<'_, Message> {
        let Some(result) = &self.state.current_result else {
            let placeholder = if self.state.loading {
                "Analyzing... this can take several minutes."
            } else {
                "Results will appear here after analysis"
            };
            return container(text(placeholder).size(16).style(text::secondary))
                .padding(60)
                .width(Length::Fill)
                .center_x(Length::Fill)
                .style(container::bordered_box)
                .into();
        };

        let header = row![
            self.view_thumbnail(&result.thumbnail, 256.0, 144.0),
            column![
                text(&result.title).size(24),
                text(format!("🎬 {}", format_date(&result.date)))
                    .size(14)
                    .style(text::secondary),
            ]
            .spacing(8),
        ]
        .spacing(20);

        let entries = file_entries(result, &self.config);
        let mut documents = Column::new().spacing(10);
        if entries.is_empty() {
            documents = documents.push(text("No documents were generated.").style(text::secondary));
        }
        for entry in entries {
            documents = documents.push(view_document_link(entry));
        }

        container(
            column![
                header,
                text("Generated Documents").size(18),
                documents,
            ]
            .spacing(20),
        )
        .padding(28)
        .width(Length::Fill)
        .style(container::rounded_box)
        .into()
    }

    fn view_thumbnail(&self, url: &str, width: f32, height: f32) -> Element<'_, Message> {
        match self.thumbnails.get(url) {
            Some(handle) => image(handle.clone())
                .width(Length::Fixed(width))
                .height(Length::Fixed(height))
                .into(),
            None => container(text(""))
                .width(Length::Fixed(width))
                .height(Length::Fixed(height))
                .style(container::dark)
                .into(),
        }
    }

    fn view_history_sidebar(&self) -> Element<'_, Message> {
        let backdrop = mouse_area(
            container(text(""))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_theme: &Theme| container::Style {
                    background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.5).into()),
                    ..container::Style::default()
                }),
        )
        .on_press(Message::Core(Msg::CloseHistory));

        let mut entries = Column::new().spacing(10);
        if let Some(placeholder) = self.state.history_placeholder() {
            entries = entries.push(
                container(text(placeholder).style(text::secondary))
                    .padding(40)
                    .center_x(Length::Fill),
            );
        }
        for (index, entry) in self.state.history.iter().enumerate() {
            entries = entries.push(self.view_history_entry(index, entry));
        }

        let panel = container(
            column![
                row![
                    text("🕒 History").size(20).width(Length::Fill),
                    button(text("✕"))
                        .style(button::text)
                        .on_press(Message::Core(Msg::CloseHistory)),
                ]
                .align_y(Alignment::Center),
                scrollable(entries).height(Length::Fill),
            ]
            .spacing(20),
        )
        .padding(20)
        .width(Length::Fixed(SIDEBAR_WIDTH))
        .height(Length::Fill)
        .style(|theme: &Theme| container::Style {
            background: Some(theme.palette().background.into()),
            ..container::Style::default()
        });

        opaque(row![backdrop, panel])
    }

    fn view_history_entry<'a>(
        &'a self,
        index: usize,
        entry: &'a AnalysisResult,
    ) -> Element<'a, Message> {
        button(
            row![
                self.view_thumbnail(&entry.thumbnail, 64.0, 40.0),
                column![
                    text(&entry.title).size(14),
                    text(format_date(&entry.date)).size(12).style(text::secondary),
                ]
                .spacing(2),
            ]
            .spacing(10)
            .align_y(Alignment::Center),
        )
        .width(Length::Fill)
        .padding(10)
        .style(button::secondary)
        .on_press(Message::Core(Msg::HistoryEntrySelected(index)))
        .into()
    }
}

fn view_separator<'a>() -> Element<'a, Message> {
    container(text("ANALYSIS RESULTS").size(12).style(text::secondary))
        .width(Length::Fill)
        .center_x(Length::Fill)
        .into()
}

fn view_document_link<'a>(entry: FileEntry) -> Element<'a, Message> {
    let [r, g, b] = entry.kind.accent();
    let accent = Color::from_rgb(r, g, b);

    button(
        row![
            text(entry.kind.icon()).size(24).color(accent),
            column![
                text(entry.label).size(16),
                text(entry.badge).size(11).color(accent),
            ]
            .spacing(2)
            .width(Length::Fill),
            text("⬇").size(16),
        ]
        .spacing(14)
        .align_y(Alignment::Center),
    )
    .width(Length::Fill)
    .padding(12)
    .style(button::secondary)
    .on_press(Message::Core(Msg::OpenLink(entry.link)))
    .into()
}

/// Blocking dialog: only the OK button dismisses it.
fn view_alert<'a>(message: &'a str) -> Element<'a, Message> {
    let dialog = container(
        column![
            text("Analysis failed").size(20),
            text(message).size(15),
            button(text("OK"))
                .padding([8, 24])
                .style(button::primary)
                .on_press(Message::Core(Msg::DismissAlert)),
        ]
        .spacing(16),
    )
    .padding(24)
    .max_width(480)
    .style(container::rounded_box);

    opaque(
        center(opaque(dialog)).style(|_theme: &Theme| container::Style {
            background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.6).into()),
            ..container::Style::default()
        }),
    )
}

const GREY: Color = Color::from_rgb(0.55, 0.57, 0.6);
const GREEN: Color = Color::from_rgb(0.2, 0.7, 0.35);
const AMBER: Color = Color::from_rgb(0.9, 0.6, 0.1);
const RED: Color = Color::from_rgb(0.86, 0.15, 0.15);
