// App state and main event loop.
// Owns the view state, spawns pager loads and applies their results.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use tokio::runtime::Handle;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, error, warn};

use crate::error::AppError;
use crate::github::UserApi;
use crate::model::{User, UserDetail};
use crate::paging::Pagination;
use crate::repository::{UserPager, UserRepository};
use crate::state::{Console, NavigationStack, UserDetailState, UserListState, ViewLevel};
use crate::ui;

type SharedPager<A> = Arc<Mutex<UserPager<A>>>;

/// Results sent back from spawned loads.
#[derive(Debug)]
pub enum AppEvent {
    /// Cached listing rows, shown while the network refresh runs.
    UsersCached { generation: u64, users: Vec<User> },
    UsersLoaded {
        generation: u64,
        users: Vec<User>,
        status: Pagination,
    },
    UsersFailed {
        generation: u64,
        users: Vec<User>,
        error: AppError,
        /// The cache still holds rows past the loaded window.
        cached_more: bool,
    },
    DetailLoaded { login: String, detail: UserDetail },
    DetailFailed { login: String, error: AppError },
}

/// Main application state.
pub struct App<A: UserApi + 'static> {
    repo: Arc<UserRepository<A>>,
    runtime: Handle,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Lives for the whole session so listing loads stay serialized.
    listing: SharedPager<A>,
    /// Pager behind the rows on screen.
    pager: SharedPager<A>,
    pub nav: NavigationStack,
    pub users: UserListState,
    pub detail: UserDetailState,
    pub console: Console,
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
}

impl<A: UserApi + 'static> App<A> {
    pub fn new(repo: Arc<UserRepository<A>>, runtime: Handle, search_debounce: Duration) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let listing = Arc::new(Mutex::new(UserPager::Listing(repo.users_pager())));
        Self {
            repo,
            runtime,
            events_tx,
            events_rx,
            pager: listing.clone(),
            listing,
            nav: NavigationStack::default(),
            users: UserListState::new(search_debounce),
            detail: UserDetailState::default(),
            console: Console::new(),
            show_help: false,
            should_quit: false,
        }
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        self.start_query(String::new());
        while !self.should_quit {
            self.drain_events();
            self.tick(Instant::now());
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key, Instant::now());
                }
            }
        }
        Ok(())
    }

    /// Timer-driven work: settled search input and near-end appends.
    pub fn tick(&mut self, now: Instant) {
        if let Some(query) = self.users.poll_query(now) {
            self.start_query(query);
        }
        if let Some(generation) = self.users.begin_append() {
            self.spawn_append(generation);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        if self.users.editing {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.users.stop_editing(),
                KeyCode::Backspace => self.users.pop_char(now),
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.users.clear_input(now)
                }
                KeyCode::Char(c) => self.users.push_char(c, now),
                _ => {}
            }
            return;
        }

        let in_users = matches!(self.nav.current(), ViewLevel::Users);
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('/') if in_users => self.users.start_editing(),
            KeyCode::Up | KeyCode::Char('k') if in_users => self.users.list.select_prev(),
            KeyCode::Down | KeyCode::Char('j') if in_users => self.users.list.select_next(),
            KeyCode::Enter if in_users => self.open_detail(),
            KeyCode::Esc => {
                if !self.nav.pop() {
                    // Leaving search returns to the listing
                    self.users.clear_input(now);
                }
            }
            KeyCode::Char('r') => self.refresh(),
            _ => {}
        }
    }

    /// Apply every result that has arrived so far.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::UsersCached { generation, users } => {
                self.users.apply_cached(generation, users);
            }
            AppEvent::UsersLoaded {
                generation,
                users,
                status,
            } => {
                let count = users.len();
                if self.users.apply_loaded(generation, users, status)
                    && count == 0
                    && self.users.is_search()
                {
                    self.console.log_info(format!(
                        "No users match \"{}\"",
                        self.users.active_query().trim()
                    ));
                }
            }
            AppEvent::UsersFailed {
                generation,
                users,
                error,
                cached_more,
            } => {
                let had_rows = !users.is_empty();
                if self.users.apply_failed(generation, users, &error, cached_more) {
                    self.console.log_error(&error);
                    if had_rows && !self.users.is_search() {
                        self.console.log_warn("Showing cached users");
                    }
                }
            }
            AppEvent::DetailLoaded { login, detail } => {
                if self.detail.is_for(&login) {
                    self.detail.set_loaded(detail);
                }
            }
            AppEvent::DetailFailed { login, error } => {
                if self.detail.is_for(&login) {
                    self.detail.set_failed();
                    self.console.log_error(&error);
                }
            }
        }
    }

    /// Switch the list to `query`: listing when blank, search otherwise.
    fn start_query(&mut self, query: String) {
        debug!(query = %query, "starting query");
        self.pager = if query.trim().is_empty() {
            self.listing.clone()
        } else {
            Arc::new(Mutex::new(self.repo.pager_for(&query)))
        };
        let generation = self.users.begin_query(query);
        self.spawn_refresh(generation, true);
    }

    /// `r`: reload whatever is on screen, which doubles as retry after a failure.
    fn refresh(&mut self) {
        match self.nav.current().clone() {
            ViewLevel::Users => {
                let generation = self.users.begin_refresh();
                self.spawn_refresh(generation, false);
            }
            ViewLevel::Detail { login } => {
                self.detail.is_loading = true;
                self.spawn_detail(login);
            }
        }
    }

    fn open_detail(&mut self) {
        let Some(login) = self.users.selected_user().map(|user| user.login.clone()) else {
            return;
        };
        let cached = self
            .repo
            .cached_user_detail(&login)
            .inspect_err(|e| warn!(login = %login, error = %e, "failed to read cached user detail"))
            .ok()
            .flatten();
        self.detail = UserDetailState::open(login.clone(), cached);
        self.nav.push(ViewLevel::Detail {
            login: login.clone(),
        });
        self.spawn_detail(login);
    }

    fn spawn_refresh(&self, generation: u64, show_cached: bool) {
        let pager = self.pager.clone();
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let mut pager = pager.lock().await;
            if show_cached {
                match pager.load_cached().await {
                    Ok(_) => {
                        let _ = tx.send(AppEvent::UsersCached {
                            generation,
                            users: pager.items(),
                        });
                    }
                    Err(e) => warn!(error = %e, "failed to read cached users"),
                }
            }
            let event = match pager.refresh().await {
                Ok(status) => AppEvent::UsersLoaded {
                    generation,
                    users: pager.items(),
                    status,
                },
                Err(e) => {
                    error!(error = %e, "failed to refresh users");
                    AppEvent::UsersFailed {
                        generation,
                        users: pager.items(),
                        error: AppError::from(&e),
                        cached_more: pager.has_cached_more(),
                    }
                }
            };
            let _ = tx.send(event);
        });
    }

    fn spawn_append(&self, generation: u64) {
        let pager = self.pager.clone();
        let tx = self.events_tx.clone();
        let anchor = self.users.list.selected();
        self.runtime.spawn(async move {
            let mut pager = pager.lock().await;
            pager.set_anchor(anchor);
            let event = match pager.append().await {
                Ok(status) => AppEvent::UsersLoaded {
                    generation,
                    users: pager.items(),
                    status,
                },
                Err(e) => {
                    error!(error = %e, "failed to load more users");
                    AppEvent::UsersFailed {
                        generation,
                        users: pager.items(),
                        error: AppError::from(&e),
                        cached_more: pager.has_cached_more(),
                    }
                }
            };
            let _ = tx.send(event);
        });
    }

    fn spawn_detail(&self, login: String) {
        let repo = self.repo.clone();
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let event = match repo.user_detail(&login).await {
                Ok(detail) => AppEvent::DetailLoaded { login, detail },
                Err(e) => AppEvent::DetailFailed {
                    login,
                    error: AppError::from(&e),
                },
            };
            let _ = tx.send(event);
        });
    }
}
