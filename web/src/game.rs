use clap::Args;
use flashgrid_core as game;
use gloo::timers::callback::Timeout;
use serde::{Deserialize, Serialize};
use web_time::Instant;
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCellState {
    Idle,
    Flashing,
    Selected,
    Correct,
    Incorrect,
}

/// Decides how a cell looks. Targets only show up while flashing or once the
/// round has a result.
fn view_cell_state(session: &game::GameSession, index: game::CellIndex) -> ViewCellState {
    use ViewCellState::*;

    match session.result() {
        Some(result) if result.correct.contains(&index) => Correct,
        Some(result) if result.incorrect.contains(&index) => Incorrect,
        Some(_) => Idle,
        None if session.is_flashing(index) => Flashing,
        None if session.selection().contains(&index) => Selected,
        None => Idle,
    }
}

fn phase_class(phase: game::Phase) -> &'static str {
    use game::Phase::*;
    match phase {
        Memorizing => "memorizing",
        Selecting => "selecting",
        Resulted => "resulted",
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum Msg {
    Cell(game::CellIndex),
    Submit,
    Reset,
    SelectLevel(usize),
    NextLevel,
    PreviousLevel,
    ToggleHint,
    Tick,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    index: game::CellIndex,
    cell_state: ViewCellState,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::CellIndex>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    use ViewCellState::*;

    let CellProps {
        index,
        cell_state,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!(
        "cell",
        match cell_state {
            Idle => classes!(),
            Flashing => classes!("flash"),
            Selected => classes!("selected"),
            Correct => classes!("correct"),
            Incorrect => classes!("incorrect"),
        }
    );
    if locked {
        class.push("locked");
    }

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("cell {} clicked", index);
        callback.emit(index);
    });

    html! {
        <td {class} {onclick}/>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Length of the memorize phase in milliseconds
    #[arg(long)]
    #[prop_or_default]
    pub memorize_ms: Option<u64>,

    /// Period of the flash toggle in milliseconds
    #[arg(long)]
    #[prop_or_default]
    pub flash_ms: Option<u64>,

    /// Level to open with, counted from zero
    #[arg(short, long)]
    #[prop_or_default]
    pub level: Option<usize>,
}

impl GameProps {
    /// Falls back to the canonical timing when the overrides are unusable.
    fn game_config(&self) -> game::GameConfig {
        let defaults = game::RoundTiming::default();
        let timing = game::RoundTiming::new(
            self.memorize_ms.unwrap_or(defaults.memorize_ms),
            self.flash_ms.unwrap_or(defaults.flash_interval_ms),
        )
        .unwrap_or_else(|err| {
            log::warn!("{}, fallback to default timing", err);
            defaults
        });

        game::GameConfig::new(game::DEFAULT_SIDE, timing).unwrap_or_else(|err| {
            log::warn!("{}, fallback to default config", err);
            game::GameConfig::default()
        })
    }
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: game::GameSession,
    epoch: Instant,
    timeout: Option<Timeout>,
}

impl GameView {
    fn now_ms(&self) -> game::Millis {
        self.epoch
            .elapsed()
            .as_millis()
            .try_into()
            .unwrap_or(game::Millis::MAX)
    }

    /// Replaces the pending browser timeout with one for the session's next
    /// deadline. Dropping the old handle cancels it.
    fn arm_timer(&mut self, ctx: &Context<Self>) {
        self.timeout = None;

        let Some(deadline) = self.session.next_deadline() else {
            return;
        };
        let delay = deadline.saturating_sub(self.now_ms());
        let delay = u32::try_from(delay).unwrap_or(u32::MAX);
        let link = ctx.link().clone();
        self.timeout = Some(Timeout::new(delay, move || link.send_message(Msg::Tick)));
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let catalog = game::RuleCatalog::canonical();
        let session = game::GameSession::with_catalog(
            props.game_config(),
            catalog,
            props.level.unwrap_or(0),
        );

        let mut view = Self {
            session,
            epoch: Instant::now(),
            timeout: None,
        };
        view.arm_timer(ctx);
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        // catch up with wall time first so clicks land in the right phase
        let ticked = self.session.advance_to(self.now_ms());

        let updated = match msg {
            Cell(index) => {
                log::debug!("toggle cell: {}", index);
                self.session.toggle_selection(index).has_update()
            }
            Submit => {
                let outcome = self.session.submit();
                if let Some(delta) = outcome.delta() {
                    log::debug!("round scored {}, total {}", delta, self.session.score().total());
                }
                outcome.has_update()
            }
            Reset => {
                self.session.reset();
                true
            }
            SelectLevel(index) => self.session.select_level(index).has_update(),
            NextLevel => self.session.next_level().has_update(),
            PreviousLevel => self.session.previous_level().has_update(),
            ToggleHint => {
                self.session.toggle_hint_visibility();
                true
            }
            Tick => false,
        };

        self.arm_timer(ctx);
        ticked || updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let session = &self.session;
        let level = session.level();
        let phase = session.phase();
        let side = usize::from(session.side()).max(1);
        let locked = !phase.accepts_selection();
        let level_index = session.level_index();

        let cb_previous = ctx.link().callback(|_: MouseEvent| PreviousLevel);
        let cb_next = ctx.link().callback(|_: MouseEvent| NextLevel);
        let cb_hint = ctx.link().callback(|_: MouseEvent| ToggleHint);
        let cb_submit = ctx.link().callback(|_: MouseEvent| Submit);
        let cb_reset = ctx.link().callback(|_: MouseEvent| Reset);
        let cb_cell = ctx.link().callback(Cell);

        let status = match (phase, session.result()) {
            (game::Phase::Memorizing, _) => format!("Memorize: {}s", session.remaining_secs()),
            (game::Phase::Selecting, _) => format!("{} selected", session.selection().len()),
            (game::Phase::Resulted, Some(result)) => format!(
                "{} correct, {} wrong, {} missed",
                result.correct_count(),
                result.wrong_count,
                result.missed_count
            ),
            (game::Phase::Resulted, None) => String::new(),
        };

        html! {
            <div class={classes!("flashgrid", phase_class(phase))}>
                <nav>
                    <button onclick={cb_previous} disabled={level_index == 0}>{"‹"}</button>
                    <ol class="levels">
                        {
                            for session.levels().iter().enumerate().map(|(index, level)| {
                                let onclick = ctx.link().callback(move |_: MouseEvent| SelectLevel(index));
                                html! {
                                    <li class={(index == level_index).then_some("active")}>
                                        <button {onclick}>{level.title}</button>
                                    </li>
                                }
                            })
                        }
                    </ol>
                    <button onclick={cb_next} disabled={level_index + 1 >= session.level_count()}>{"›"}</button>
                    <aside>{format!("Score: {}", session.score().total())}</aside>
                </nav>
                <header>
                    <h2>{level.title}</h2>
                    <button onclick={cb_hint}>{ if session.hint_visible() { "Hide hint" } else { "Show hint" } }</button>
                    if session.hint_visible() {
                        <p class="hint">{level.description}</p>
                    }
                    <span class="status">{status}</span>
                </header>
                <table class={(!locked).then_some("playable")}>
                    {
                        for session.cells().chunks(side).map(|row| html! {
                            <tr>
                                {
                                    for row.iter().map(|cell| {
                                        let index = cell.index;
                                        let cell_state = view_cell_state(session, index);
                                        let callback = cb_cell.clone();
                                        html! {
                                            <CellView {index} {cell_state} {locked} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                <footer>
                    <button onclick={cb_submit} disabled={locked}>{"Submit"}</button>
                    <button onclick={cb_reset}>{"Restart round"}</button>
                </footer>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selecting_session() -> game::GameSession {
        let timing = game::RoundTiming::new(1_000, 500).unwrap();
        let mut session = game::GameSession::new(game::GameConfig::new(5, timing).unwrap());
        session.advance_to(1_000);
        session
    }

    #[test]
    fn targets_only_show_while_flashing() {
        let mut session = game::GameSession::default();

        assert_eq!(view_cell_state(&session, 0), ViewCellState::Flashing);
        assert_eq!(view_cell_state(&session, 1), ViewCellState::Idle);

        session.advance_to(600);
        assert_eq!(view_cell_state(&session, 0), ViewCellState::Idle);
    }

    #[test]
    fn selection_is_drawn_during_selecting() {
        let mut session = selecting_session();
        session.toggle_selection(3);

        assert_eq!(view_cell_state(&session, 3), ViewCellState::Selected);
        assert_eq!(view_cell_state(&session, 0), ViewCellState::Idle);
    }

    #[test]
    fn result_colors_hits_wrong_picks_and_misses() {
        let mut session = selecting_session();
        session.toggle_selection(0);
        session.toggle_selection(1);
        session.submit();

        assert_eq!(view_cell_state(&session, 0), ViewCellState::Correct);
        assert_eq!(view_cell_state(&session, 1), ViewCellState::Incorrect);
        assert_eq!(view_cell_state(&session, 2), ViewCellState::Incorrect);
        assert_eq!(view_cell_state(&session, 3), ViewCellState::Idle);
    }

    #[test]
    fn unusable_overrides_fall_back_to_defaults() {
        let props = GameProps {
            memorize_ms: Some(3_000),
            flash_ms: Some(0),
            level: None,
        };

        assert_eq!(props.game_config(), game::GameConfig::default());
    }

    #[test]
    fn overrides_reach_the_config() {
        let props = GameProps {
            memorize_ms: Some(3_000),
            flash_ms: Some(250),
            level: Some(1),
        };
        let config = props.game_config();

        assert_eq!(config.timing.memorize_ms, 3_000);
        assert_eq!(config.timing.flash_interval_ms, 250);
    }

    #[test]
    fn phase_classes() {
        assert_eq!(phase_class(game::Phase::Memorizing), "memorizing");
        assert_eq!(phase_class(game::Phase::Resulted), "resulted");
    }
}
