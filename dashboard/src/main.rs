use std::sync::Arc;
use std::time::Duration;

use fedwatchcore::metrics::MetricSample;
use fedwatchcore::poll::{PollSession, SeriesState};
use fedwatchcore::prelude::PollConfig;
use fedwatchcore::telemetry::FetchTally;
use iced::{
    time,
    widget::{canvas::Canvas, column, scrollable, text, Column, Container},
    Element, Length, Subscription, Task, Theme,
};
use tokio::sync::watch;

use crate::chart::MetricsChart;
use crate::client::{ClientSettings, HttpSeriesSource};

mod chart;
mod client;

fn main() -> iced::Result {
    env_logger::init();
    iced::application(Dashboard::boot, Dashboard::update, Dashboard::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Dashboard) -> String {
    "FedWatch Dashboard".into()
}

fn application_subscription(_: &Dashboard) -> Subscription<Message> {
    time::every(Duration::from_millis(250)).map(|_| Message::Refresh)
}

fn application_theme(_: &Dashboard) -> Theme {
    Theme::Dark
}

struct Dashboard {
    session: PollSession,
    feed: watch::Receiver<SeriesState>,
    series: Vec<MetricSample>,
    populated: bool,
    tally: FetchTally,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    Refresh,
}

impl Dashboard {
    fn boot() -> (Self, Task<Message>) {
        let settings = ClientSettings::from_env();
        let source = Arc::new(HttpSeriesSource::new(settings.endpoint.clone()));
        let session = PollSession::start(source, PollConfig::with_interval_ms(settings.interval_ms));
        let feed = session.subscribe();

        (
            Dashboard {
                session,
                feed,
                series: Vec::new(),
                populated: false,
                tally: FetchTally::default(),
                status: format!("Waiting for metrics from {}...", settings.endpoint),
                history: Vec::new(),
            },
            Task::none(),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Refresh => {
                if state.feed.has_changed().unwrap_or(false) {
                    let snapshot = state.feed.borrow_and_update().clone();
                    state.series = snapshot.samples().to_vec();
                    state.populated = snapshot.is_populated();
                    state.status = match state.series.last() {
                        Some(sample) => format!(
                            "Round {} -> loss {:.4} | accuracy {:.4} | epsilon {:.2}",
                            sample.round, sample.loss, sample.accuracy, sample.epsilon
                        ),
                        None => "Received an empty series".into(),
                    };
                    state.push_history(format!("Series replaced: {} rounds", state.series.len()));
                }

                let tally = state.session.recorder().snapshot();
                if tally.failed > state.tally.failed {
                    if let Some(failure) = &tally.last_failure {
                        state.push_history(format!("Fetch failed: {failure}"));
                    }
                }
                state.tally = tally;
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let summary = if state.populated {
            text(format!("{} rounds on record", state.series.len())).size(18)
        } else {
            text("No metrics received yet").size(18)
        };

        let chart = Canvas::new(MetricsChart::new(&state.series))
            .width(Length::Fill)
            .height(Length::Fixed(400.0));

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let layout = column![
            text("Training Metrics").size(26),
            summary,
            chart,
            text(&state.status).size(14),
            text(format!(
                "Fetches: {} ok / {} failed",
                state.tally.succeeded, state.tally.failed
            ))
            .size(14),
            text("Activity log").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(120.0))).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fill);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}
