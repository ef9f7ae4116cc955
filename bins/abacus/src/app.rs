//! Driver state: calculator, finance forms and converter panel.

use std::time::{Duration, Instant};

use abacus_core::calculator::{Calculator, CalculatorMode};
use abacus_core::currency::{
    CurrencyConverter, CurrencySelection, RateProvider, RefreshCompletion, RefreshTrigger,
    StatusBoard,
};
use abacus_core::finance::{
    CompoundInterestForm, FINANCE_ERROR_DISPLAY, LoanForm, SimpleInterestForm,
};
use abacus_shared::SUPPORTED_CURRENCIES;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::command::{Command, HELP};

/// What the driver should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print these lines and keep reading.
    Lines(Vec<String>),
    /// Stop.
    Quit,
}

/// Everything the panels own, driven one command at a time.
pub struct App<P: RateProvider> {
    calculator: Calculator,
    converter: CurrencyConverter<P>,
    selection: CurrencySelection,
    status: StatusBoard,
    completions: UnboundedSender<RefreshCompletion>,
}

impl<P: RateProvider + 'static> App<P> {
    /// Creates the app. No refresh is issued until [`App::start`].
    pub fn new(
        mode: CalculatorMode,
        converter: CurrencyConverter<P>,
        selection: CurrencySelection,
        status_ttl: Duration,
        completions: UnboundedSender<RefreshCompletion>,
    ) -> Self {
        Self {
            calculator: Calculator::new(mode),
            converter,
            selection,
            status: StatusBoard::new(status_ttl),
            completions,
        }
    }

    /// Issue the startup fetch for the selected source currency.
    pub fn start(&mut self, delay: Duration) {
        self.refresh(RefreshTrigger::Startup, delay);
    }

    fn refresh(&mut self, trigger: RefreshTrigger, delay: Duration) {
        let ticket = self.converter.spawn_refresh(
            self.selection.from().clone(),
            trigger,
            delay,
            self.completions.clone(),
        );
        self.status.refresh_started(&ticket, trigger);
    }

    /// Apply a finished refresh and report what changed.
    pub fn apply(&mut self, completion: RefreshCompletion, now: Instant) -> Vec<String> {
        let trigger = completion.trigger;
        let outcome = self.converter.complete(completion);
        self.status.refresh_finished(trigger, &outcome, now);

        if outcome.is_err() && trigger != RefreshTrigger::Manual {
            debug!(?trigger, "Background refresh did not update rates");
        }

        let mut lines = vec![format!("[rates] {}", self.status.status())];
        if let Some(msg) = self.status.message(now) {
            lines.push(format!("[rates] {}", msg.text));
        }
        lines
    }

    /// Execute one command.
    pub fn handle(&mut self, command: Command, now: Instant) -> Reply {
        let lines = match command {
            Command::Keys(keys) => self.press_keys(&keys),
            Command::Mode(mode) => {
                self.calculator.set_mode(mode);
                vec![format!("Mode: {mode}")]
            }
            Command::Simple {
                principal,
                rate,
                years,
            } => {
                let form = SimpleInterestForm {
                    principal,
                    rate_percent: rate,
                    years,
                };
                finance_lines(form.calculate())
            }
            Command::Compound {
                principal,
                rate,
                years,
                periods,
            } => {
                let form = CompoundInterestForm {
                    principal,
                    rate_percent: rate,
                    years,
                    compounds_per_year: periods,
                };
                finance_lines(form.calculate())
            }
            Command::Loan {
                principal,
                rate,
                years,
            } => {
                let form = LoanForm {
                    principal,
                    annual_rate_percent: rate,
                    term_years: years,
                };
                finance_lines(form.calculate())
            }
            Command::From(code) => {
                if let Some(trigger) = self.selection.select_from(code) {
                    self.refresh(trigger, Duration::ZERO);
                }
                vec![format!("From: {}", self.selection.from()), self.status_line()]
            }
            Command::To(code) => {
                self.selection.select_to(code);
                vec![format!("To: {}", self.selection.to())]
            }
            Command::Convert(amount) => {
                let result = self
                    .selection
                    .request(&amount)
                    .and_then(|request| self.converter.convert(&request));
                match result {
                    Ok(converted) => vec![converted.to_string()],
                    Err(err) => {
                        debug!(error = %err, "Conversion failed");
                        vec![err.display_message().to_string()]
                    }
                }
            }
            Command::Update => {
                self.refresh(RefreshTrigger::Manual, Duration::ZERO);
                vec![self.status_line()]
            }
            Command::Currencies => vec![SUPPORTED_CURRENCIES.join(" ")],
            Command::Status => {
                let mut lines = vec![self.status_line()];
                if let Some(msg) = self.status.message(now) {
                    lines.push(msg.text.clone());
                }
                lines
            }
            Command::Help => HELP.lines().map(ToString::to_string).collect(),
            Command::Quit => return Reply::Quit,
        };
        Reply::Lines(lines)
    }

    fn press_keys(&mut self, keys: &[String]) -> Vec<String> {
        let mode = self.calculator.mode();
        if let Some(missing) = keys.iter().find(|key| !mode.has_key(key)) {
            return vec![format!("Key '{missing}' is not on the {mode} keypad")];
        }
        for key in keys {
            self.calculator.press(key);
        }
        vec![self.calculator.display().to_string()]
    }

    fn status_line(&self) -> String {
        self.status.status().to_string()
    }
}

fn finance_lines<T: std::fmt::Display, E: std::fmt::Display>(result: Result<T, E>) -> Vec<String> {
    match result {
        Ok(value) => value.to_string().lines().map(ToString::to_string).collect(),
        Err(err) => {
            debug!(error = %err, "Finance form rejected");
            vec![FINANCE_ERROR_DISPLAY.to_string()]
        }
    }
}
