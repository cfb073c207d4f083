use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use iced::widget::image;
use iced::{Task, Theme};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use videoinsight_core::{
    AppState, Backend, ClientConfig, ClientError, Effect, Msg, ReqwestBackend, execute,
};

mod view;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,videoinsight=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ClientConfig::from_env();
    info!("using backend at {}", config.api_base);
    let backend = Arc::new(ReqwestBackend::new(config.clone())?);

    iced::application(
        move || App::new(config.clone(), backend.clone()),
        App::update,
        App::view,
    )
    .title(App::title)
    .theme(App::theme)
    .window_size((1100.0, 820.0))
    .run()?;

    Ok(())
}

struct App {
    state: AppState,
    config: ClientConfig,
    backend: Arc<ReqwestBackend>,
    thumbnails: HashMap<String, image::Handle>,
    requested_thumbnails: HashSet<String>,
}

#[derive(Debug, Clone)]
enum Message {
    Core(Msg),
    ThumbnailLoaded(String, Result<Vec<u8>, ClientError>),
}

impl App {
    fn new(config: ClientConfig, backend: Arc<ReqwestBackend>) -> (Self, Task<Message>) {
        let (state, effects) = AppState::boot();
        let app = Self {
            state,
            config,
            backend,
            thumbnails: HashMap::new(),
            requested_thumbnails: HashSet::new(),
        };
        let task = app.perform(effects);
        (app, task)
    }

    fn title(&self) -> String {
        match &self.state.current_result {
            Some(result) => format!("VideoInsight AI - {}", result.title),
            None => "VideoInsight AI".to_string(),
        }
    }

    fn theme(&self) -> Theme {
        if self.state.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Core(msg) => {
                let effects = self.state.update(msg);
                Task::batch([self.perform(effects), self.load_thumbnails()])
            }
            Message::ThumbnailLoaded(url, Ok(bytes)) => {
                self.thumbnails
                    .insert(url, image::Handle::from_bytes(bytes));
                Task::none()
            }
            Message::ThumbnailLoaded(url, Err(err)) => {
                debug!("thumbnail {} unavailable: {}", url, err);
                Task::none()
            }
        }
    }

    fn perform(&self, effects: Vec<Effect>) -> Task<Message> {
        Task::batch(effects.into_iter().map(|effect| self.perform_one(effect)))
    }

    fn perform_one(&self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::OpenLink(link) => {
                info!("opening {}", link);
                if let Err(err) = open::that(&link) {
                    warn!("could not open {}: {}", link, err);
                }
                Task::none()
            }
            effect => {
                let backend = Arc::clone(&self.backend);
                Task::future(async move { execute(backend.as_ref(), effect).await }).then(
                    |reply| match reply {
                        Some(msg) => Task::done(Message::Core(msg)),
                        None => Task::none(),
                    },
                )
            }
        }
    }

    /// Fetches thumbnails of the visible result and history entries once.
    fn load_thumbnails(&mut self) -> Task<Message> {
        let wanted: Vec<String> = self
            .state
            .current_result
            .iter()
            .chain(self.state.history.iter())
            .map(|entry| entry.thumbnail.clone())
            .filter(|url| !url.is_empty() && !self.requested_thumbnails.contains(url))
            .collect();

        let mut tasks = Vec::new();
        for url in wanted {
            if !self.requested_thumbnails.insert(url.clone()) {
                continue;
            }
            let backend = Arc::clone(&self.backend);
            let key = url.clone();
            tasks.push(Task::perform(
                async move { backend.fetch_bytes(&url).await },
                move |result| Message::ThumbnailLoaded(key.clone(), result),
            ));
        }
        Task::batch(tasks)
    }
}
