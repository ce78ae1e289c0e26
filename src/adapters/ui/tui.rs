//! Implements InputPort. Inquire-based interactive prompts.
//!
//! One menu loop over the coordinator: edit the form, search, pick results,
//! export. The state panel is redrawn from a snapshot before every prompt.

use crate::adapters::ui::{map, theme};
use crate::domain::{
    Activation, AppState, Completion, Coordinate, DomainError, ExportArtifact, ExportSink,
    ExportStatus, KEYWORD_SUGGESTIONS, Notification, NotificationKind, SessionPhase,
    category_for,
};
use crate::ports::InputPort;
use crate::usecases::SearchCoordinator;
use async_trait::async_trait;
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use indicatif::{ProgressBar, ProgressStyle};
use inquire::{CustomUserError, InquireError, MultiSelect, Select, Text};
use std::fmt;
use std::io::{Write, stdout};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Keyword,
    BrowseSuggestions,
    TypeCity,
    FindCity,
    ClickMap,
    ResolveCityAgain,
    Radius,
    Search,
    DismissError,
    PickResults,
    SelectAll,
    Export(ExportSink),
    DismissNotification,
    ToggleTheme,
    Quit,
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuAction::Keyword => f.write_str("Set keyword"),
            MenuAction::BrowseSuggestions => f.write_str("Browse keyword ideas"),
            MenuAction::TypeCity => f.write_str("Type city"),
            MenuAction::FindCity => f.write_str("Find city (autocomplete)"),
            MenuAction::ClickMap => f.write_str("Pin on map (lat, lng)"),
            MenuAction::ResolveCityAgain => f.write_str("Locate typed city again"),
            MenuAction::Radius => f.write_str("Set radius"),
            MenuAction::Search => f.write_str("Search"),
            MenuAction::DismissError => f.write_str("Dismiss search error"),
            MenuAction::PickResults => f.write_str("Pick results"),
            MenuAction::SelectAll => f.write_str("Select / deselect all"),
            MenuAction::Export(sink) => write!(f, "Export to {}", sink),
            MenuAction::DismissNotification => f.write_str("Dismiss notification"),
            MenuAction::ToggleTheme => f.write_str("Toggle dark mode"),
            MenuAction::Quit => f.write_str("Quit"),
        }
    }
}

/// Actions that make sense for `state`. Exports need a non-empty selection.
fn menu_for(state: &AppState, has_notification: bool) -> Vec<MenuAction> {
    let mut actions = vec![
        MenuAction::Search,
        MenuAction::Keyword,
        MenuAction::BrowseSuggestions,
        MenuAction::TypeCity,
        MenuAction::FindCity,
        MenuAction::ClickMap,
    ];
    if state.location().is_unlinked() && !state.location().city_text().trim().is_empty() {
        actions.push(MenuAction::ResolveCityAgain);
    }
    actions.push(MenuAction::Radius);
    if state.session().phase() == SessionPhase::Failed {
        actions.push(MenuAction::DismissError);
    }
    if !state.records().is_empty() {
        actions.push(MenuAction::PickResults);
        actions.push(MenuAction::SelectAll);
    }
    if !state.selection().is_empty() {
        actions.extend(ExportSink::ALL.map(MenuAction::Export));
    }
    if has_notification {
        actions.push(MenuAction::DismissNotification);
    }
    actions.push(MenuAction::ToggleTheme);
    actions.push(MenuAction::Quit);
    actions
}

/// MultiSelect row for one record.
struct ResultOption {
    id: String,
    label: String,
}

impl fmt::Display for ResultOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

fn keyword_completions(input: &str) -> Result<Vec<String>, CustomUserError> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Ok(Vec::new());
    }
    Ok(KEYWORD_SUGGESTIONS
        .iter()
        .flat_map(|cat| cat.keywords.iter())
        .filter(|k| k.to_lowercase().starts_with(&needle))
        .map(|k| k.to_string())
        .collect())
}

/// `Ok(None)` when the user backed out of the prompt.
fn answered<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn say(color: Color, text: &str) {
    let mut out = stdout();
    let _ = out.execute(SetForegroundColor(color));
    let _ = out.execute(Print(text));
    let _ = out.execute(Print("\r\n"));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

fn warn_user(e: &DomainError) {
    say(Color::Yellow, &format!("⚠ {}", e.user_message()));
}

fn render(state: &AppState, notification: Option<&Notification>) {
    say(Color::DarkGrey, "────────────────────────────────────────");
    let keyword = state.keyword();
    if keyword.is_empty() {
        say(Color::Reset, "Keyword : -");
    } else {
        let cat = category_for(keyword);
        say(
            Color::Reset,
            &format!("Keyword : {}  {} {}", keyword, cat.emoji, cat.name),
        );
    }
    let city = state.location().city_text();
    say(
        Color::Reset,
        &format!("City    : {}", if city.is_empty() { "-" } else { city }),
    );
    say(Color::Reset, &format!("Radius  : {} km", state.radius_km()));
    say(
        Color::Cyan,
        &map::render_circle(&state.circle(), state.location().source()),
    );
    if let Some(err) = state.location().last_error() {
        say(Color::Yellow, &format!("Location: {}", err));
    }

    match state.session().phase() {
        SessionPhase::Idle => {}
        SessionPhase::Submitting => say(Color::Cyan, "Searching…"),
        SessionPhase::Failed => say(
            Color::Red,
            &format!("✗ {}", state.session().error().unwrap_or("Search failed")),
        ),
        SessionPhase::Succeeded if state.records().is_empty() => {
            say(Color::Reset, "No results. Try one of these keywords:");
            for cat in KEYWORD_SUGGESTIONS {
                say(
                    Color::DarkGrey,
                    &format!("  {} {}: {}", cat.emoji, cat.name, cat.keywords.join(", ")),
                );
            }
        }
        SessionPhase::Succeeded => {
            say(
                Color::Green,
                &format!(
                    "{} results, {} selected",
                    state.records().len(),
                    state.selection().len()
                ),
            );
            for line in map::render_results(state.records(), state.selection()) {
                say(Color::Reset, &line);
            }
        }
    }

    if state.exports_in_flight() > 0 {
        say(
            Color::Cyan,
            &format!("{} export(s) running…", state.exports_in_flight()),
        );
    }
    if let Some(n) = notification {
        let color = match n.kind {
            NotificationKind::Success => Color::Green,
            NotificationKind::Error => Color::Red,
        };
        say(color, &format!("● {}", n.message));
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    coordinator: Arc<SearchCoordinator>,
}

impl TuiInputPort {
    pub fn new(coordinator: Arc<SearchCoordinator>) -> Self {
        Self { coordinator }
    }

    async fn wait_for_location(&self) {
        let pb = spinner("Locating city…");
        let completion = self.coordinator.settle_location().await;
        pb.finish_and_clear();
        if completion == Some(Completion::Failed) {
            say(
                Color::Yellow,
                "City not found; the search will use the city name as text.",
            );
        }
    }

    async fn edit_keyword(&self, current: &str) -> Result<(), DomainError> {
        let answer = answered(
            Text::new("Keyword:")
                .with_initial_value(current)
                .with_autocomplete(keyword_completions)
                .with_help_message("e.g. boulangerie, coiffeur, plombier")
                .prompt(),
        )?;
        if let Some(keyword) = answer {
            self.coordinator.set_keyword(keyword.trim()).await;
        }
        Ok(())
    }

    async fn browse_suggestions(&self) -> Result<(), DomainError> {
        let categories: Vec<String> = KEYWORD_SUGGESTIONS
            .iter()
            .map(|c| format!("{} {}", c.emoji, c.name))
            .collect();
        let Some(picked) = answered(Select::new("Category:", categories.clone()).prompt())? else {
            return Ok(());
        };
        let Some(index) = categories.iter().position(|c| *c == picked) else {
            return Ok(());
        };
        let keywords: Vec<&str> = KEYWORD_SUGGESTIONS[index].keywords.to_vec();
        if let Some(keyword) = answered(Select::new("Keyword:", keywords).prompt())? {
            self.coordinator.set_keyword(keyword).await;
        }
        Ok(())
    }

    async fn type_city(&self, current: &str) -> Result<(), DomainError> {
        let Some(raw) = answered(Text::new("City:").with_initial_value(current).prompt())? else {
            return Ok(());
        };
        match self.coordinator.edit_city(raw).await {
            Activation::Lookup { .. } => self.wait_for_location().await,
            Activation::LabelOnly => say(
                Color::DarkGrey,
                "Map pin kept. Use \"Locate typed city again\" to move it to this city.",
            ),
            Activation::Resolved(_) | Activation::Cleared => {}
        }
        Ok(())
    }

    async fn find_city(&self) -> Result<(), DomainError> {
        let Some(partial) = answered(Text::new("Start typing a city:").prompt())? else {
            return Ok(());
        };
        let pb = spinner("Looking up places…");
        let candidates = self.coordinator.suggest_places(&partial).await;
        pb.finish_and_clear();
        let candidates = match candidates {
            Ok(c) if c.is_empty() => {
                say(Color::Yellow, "No matching city.");
                return Ok(());
            }
            Ok(c) => c,
            Err(e) => {
                warn_user(&e);
                return Ok(());
            }
        };
        let Some(candidate) = answered(Select::new("City:", candidates).prompt())? else {
            return Ok(());
        };
        match self.coordinator.select_place(&candidate).await {
            Ok(Completion::Stale) => say(Color::DarkGrey, "Location changed meanwhile; selection ignored."),
            Ok(_) => {}
            Err(e) => warn_user(&e),
        }
        Ok(())
    }

    async fn click_map(&self) -> Result<(), DomainError> {
        let Some(input) = answered(
            Text::new("Coordinates:")
                .with_help_message("latitude, longitude (e.g. 45.7640, 4.8357)")
                .prompt(),
        )?
        else {
            return Ok(());
        };
        match Coordinate::parse_pair(&input) {
            Ok(coordinate) => {
                self.coordinator.click_map(coordinate).await;
            }
            Err(e) => warn_user(&e),
        }
        Ok(())
    }

    async fn resolve_city_again(&self) {
        if let Some(Activation::Lookup { .. }) = self.coordinator.resolve_city_again().await {
            self.wait_for_location().await;
        }
    }

    async fn edit_radius(&self, current: &str) -> Result<(), DomainError> {
        let answer = answered(
            Text::new("Radius (km):")
                .with_initial_value(current)
                .with_help_message("1 to 50")
                .prompt(),
        )?;
        if let Some(input) = answer {
            self.coordinator.set_radius(input).await;
        }
        Ok(())
    }

    async fn search(&self) {
        // A lookup still in its quiet period would otherwise be skipped.
        self.coordinator.settle_location().await;
        let pb = spinner("Searching…");
        let outcome = self.coordinator.submit_search().await;
        pb.finish_and_clear();
        if let Err(e) = outcome {
            warn_user(&e);
        }
    }

    async fn pick_results(&self, state: &AppState) -> Result<(), DomainError> {
        let lines = map::render_results(state.records(), state.selection());
        let options: Vec<ResultOption> = state
            .records()
            .iter()
            .zip(lines)
            .map(|(r, line)| ResultOption {
                id: r.id.clone(),
                // Drop the checkbox; MultiSelect draws its own.
                label: line.get(4..).unwrap_or(&line).to_string(),
            })
            .collect();
        let defaults: Vec<usize> = state
            .records()
            .iter()
            .enumerate()
            .filter(|(_, r)| state.selection().contains(&r.id))
            .map(|(i, _)| i)
            .collect();

        let Some(chosen) = answered(
            MultiSelect::new("Results to export:", options)
                .with_default(&defaults)
                .with_page_size(15)
                .prompt(),
        )?
        else {
            return Ok(());
        };

        for record in state.records() {
            let wanted = chosen.iter().any(|o| o.id == record.id);
            if wanted != state.selection().contains(&record.id) {
                self.coordinator.toggle_result(&record.id).await;
            }
        }
        Ok(())
    }

    async fn export(&self, sink: ExportSink) {
        let pb = spinner(&format!("Exporting to {}…", sink));
        let outcome = self.coordinator.export(sink).await;
        pb.finish_and_clear();
        match outcome {
            Ok(ExportStatus::Succeeded(Some(ExportArtifact::File(path)))) => {
                say(Color::Green, &format!("Saved {}", path.display()));
            }
            Ok(_) => {}
            Err(e) => warn_user(&e),
        }
    }

    async fn toggle_theme(&self) {
        match self.coordinator.toggle_dark_mode().await {
            Ok(dark) => theme::apply(dark),
            Err(e) => {
                let dark = self.coordinator.snapshot().await.dark_mode();
                theme::apply(dark);
                warn_user(&e);
            }
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        theme::apply(self.coordinator.snapshot().await.dark_mode());
        loop {
            let state = self.coordinator.snapshot().await;
            let notification = self.coordinator.notification().await;
            render(&state, notification.as_ref());

            let actions = menu_for(&state, notification.is_some());
            let Some(action) = answered(Select::new("Action:", actions).with_page_size(12).prompt())?
            else {
                return Ok(());
            };

            match action {
                MenuAction::Keyword => self.edit_keyword(state.keyword()).await?,
                MenuAction::BrowseSuggestions => self.browse_suggestions().await?,
                MenuAction::TypeCity => self.type_city(state.location().city_text()).await?,
                MenuAction::FindCity => self.find_city().await?,
                MenuAction::ClickMap => self.click_map().await?,
                MenuAction::ResolveCityAgain => self.resolve_city_again().await,
                MenuAction::Radius => self.edit_radius(state.radius_input()).await?,
                MenuAction::Search => self.search().await,
                MenuAction::DismissError => self.coordinator.dismiss_search_error().await,
                MenuAction::PickResults => self.pick_results(&state).await?,
                MenuAction::SelectAll => {
                    self.coordinator.select_all().await;
                }
                MenuAction::Export(sink) => self.export(sink).await,
                MenuAction::DismissNotification => self.coordinator.dismiss_notification().await,
                MenuAction::ToggleTheme => self.toggle_theme().await,
                MenuAction::Quit => return Ok(()),
            }
        }
    }
}
