use std::{sync::Arc, time::Duration};

use chrono_tz::Tz;
use crossterm::event::{self, Event};
use engine::Currency;

use crate::{
    client::{Client, ClientError},
    config::AppConfig,
    dashboard::{self, DashboardState},
    error::{AppError, Result},
    forms::{Form, FormState, ForgotPasswordForm, LoginForm, RegisterForm},
    local_state::FileStore,
    ui::{
        self,
        keymap::{AppAction, KeyContext},
    },
};

const REGISTERED: &str = "Registration successful! Please log in.";
const REGISTER_FAILED: &str = "Registration failed";
const LOGIN_FAILED: &str = "Login failed";
const RESET_SENT: &str = "We've sent a password reset link to your email.";
const RESET_FAILED: &str = "No account is associated with this email.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    ForgotPassword,
    Dashboard,
}

impl Screen {
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Register => "Create account",
            Self::ForgotPassword => "Reset password",
            Self::Dashboard => "Dashboard",
        }
    }

    fn key_context(self) -> KeyContext {
        match self {
            Self::Dashboard => KeyContext::Dashboard,
            Self::Login | Self::Register | Self::ForgotPassword => KeyContext::Form,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Banner shown above an auth form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub login: FormState<LoginForm>,
    pub register: FormState<RegisterForm>,
    pub forgot_password: FormState<ForgotPasswordForm>,
    pub notice: Option<Notice>,
    pub dashboard: DashboardState,
    /// Set when the dashboard should be (re)loaded on the next tick.
    pub loading: bool,
    pub currency: Currency,
    pub base_url: String,
}

pub struct App {
    client: Client,
    timezone: Tz,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let store = Arc::new(FileStore::open(&config.state_path)?);
        let client = Client::new(&config.base_url, store)?;
        Ok(Self::with_client(
            client,
            config.timezone()?,
            config.currency()?,
            config.base_url.clone(),
        ))
    }

    fn with_client(client: Client, timezone: Tz, currency: Currency, base_url: String) -> Self {
        let screen = if client.is_authenticated() {
            Screen::Dashboard
        } else {
            Screen::Login
        };
        tracing::info!(?screen, "starting");

        let state = AppState {
            screen,
            login: FormState::default(),
            register: FormState::default(),
            forgot_password: FormState::default(),
            notice: None,
            dashboard: DashboardState::new(dashboard::today_in(timezone)),
            loading: screen == Screen::Dashboard,
            currency,
            base_url,
        };

        Self {
            client,
            timezone,
            state,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            // Drawn once with the loading marker before the requests block.
            if self.state.loading {
                self.load_dashboard().await;
                continue;
            }

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    let action = ui::keymap::map_key(key, self.state.screen.key_context());
                    self.handle_action(action).await;
                }
            }
        }

        Ok(())
    }

    async fn handle_action(&mut self, action: AppAction) {
        match (self.state.screen, action) {
            (_, AppAction::Quit) => self.should_quit = true,
            (_, AppAction::None) => {}
            (Screen::Dashboard, AppAction::Refresh) => self.state.loading = true,
            (Screen::Dashboard, AppAction::Logout) => self.logout(),
            (Screen::Dashboard, _) => {}
            (Screen::Login, AppAction::GoRegister) => self.navigate(Screen::Register),
            (Screen::Login, AppAction::GoForgotPassword) => self.navigate(Screen::ForgotPassword),
            (Screen::Register | Screen::ForgotPassword, AppAction::Back) => {
                self.navigate(Screen::Login)
            }
            (Screen::Login, AppAction::Submit) => self.attempt_login().await,
            (Screen::Register, AppAction::Submit) => self.attempt_register().await,
            (Screen::ForgotPassword, AppAction::Submit) => self.attempt_password_reset().await,
            (Screen::Login, _) => edit(&mut self.state.login, action),
            (Screen::Register, _) => edit(&mut self.state.register, action),
            (Screen::ForgotPassword, _) => edit(&mut self.state.forgot_password, action),
        }
    }

    /// Switches screens with a fresh form and no banner.
    fn navigate(&mut self, screen: Screen) {
        match screen {
            Screen::Login => self.state.login.reset(),
            Screen::Register => self.state.register.reset(),
            Screen::ForgotPassword => self.state.forgot_password.reset(),
            Screen::Dashboard => self.state.loading = true,
        }
        self.state.notice = None;
        self.state.screen = screen;
    }

    async fn attempt_login(&mut self) {
        if !self.state.login.check() {
            return;
        }
        let credentials = self.state.login.form.credentials();

        match self.client.login(&credentials).await {
            Ok(_) => {
                tracing::info!("logged in");
                self.navigate(Screen::Dashboard);
            }
            Err(err) => {
                tracing::warn!(error = %err, "login rejected");
                self.state.notice = Some(Notice::error(err.detail().unwrap_or(LOGIN_FAILED)));
            }
        }
    }

    async fn attempt_register(&mut self) {
        if !self.state.register.check() {
            return;
        }
        let user = self.state.register.form.user();

        match self.client.register(&user).await {
            Ok(created) => {
                tracing::info!(id = ?created.id, "account created");
                self.navigate(Screen::Login);
                self.state.notice = Some(Notice::success(REGISTERED));
            }
            Err(err) => {
                tracing::warn!(error = %err, "registration rejected");
                self.state.notice = Some(Notice::error(err.message().unwrap_or(REGISTER_FAILED)));
            }
        }
    }

    async fn attempt_password_reset(&mut self) {
        if !self.state.forgot_password.check() {
            return;
        }
        let email = self.state.forgot_password.form.email.clone();

        match self.client.request_password_reset(&email).await {
            Ok(_) => {
                self.state.forgot_password.reset();
                self.state.notice = Some(Notice::success(RESET_SENT));
            }
            Err(err) => {
                tracing::warn!(error = %err, "password reset rejected");
                self.state.notice = Some(Notice::error(err.detail().unwrap_or(RESET_FAILED)));
            }
        }
    }

    fn logout(&mut self) {
        if let Err(err) = self.client.logout() {
            tracing::error!(error = %err, "failed to clear stored token");
        }
        self.sign_out();
    }

    fn sign_out(&mut self) {
        self.state.dashboard = DashboardState::new(dashboard::today_in(self.timezone));
        self.state.loading = false;
        self.navigate(Screen::Login);
    }

    /// Runs one dashboard load. Failures other than an expired session are
    /// only logged and the previous figures stay on screen.
    async fn load_dashboard(&mut self) {
        self.state.loading = false;
        let result = dashboard::refresh(
            &mut self.state.dashboard,
            &self.client,
            self.timezone,
            self.state.currency,
        )
        .await;

        match result {
            Ok(()) => {}
            Err(ClientError::Unauthorized(_)) => {
                tracing::warn!("session rejected, returning to login");
                self.sign_out();
            }
            Err(err) => tracing::error!(error = %err, "Error fetching dashboard data"),
        }
    }
}

fn edit<F: Form>(form: &mut FormState<F>, action: AppAction) {
    match action {
        AppAction::NextField => form.next_field(),
        AppAction::PrevField => form.prev_field(),
        AppAction::Backspace => form.backspace(),
        AppAction::ToggleReveal => form.toggle_reveal(),
        AppAction::Input(ch) => form.push(ch),
        _ => {}
    }
}
