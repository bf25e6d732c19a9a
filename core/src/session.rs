use crate::*;

/// Everything one player session needs: the board, the level catalog, the
/// current round and the running score.
///
/// The inbound methods never fail. Interactions that make no sense in the
/// current phase are ignored and reported as `NoChange`.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    catalog: RuleCatalog,
    level_index: usize,
    generation: u64,
    engine: RoundEngine,
    score: Score,
    hint_visible: bool,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        Self::with_catalog(config, RuleCatalog::canonical(), 0)
    }

    pub fn with_catalog(config: GameConfig, catalog: RuleCatalog, level_index: usize) -> Self {
        let grid = Grid::new(config.side);
        let level_index = catalog.clamp_index(level_index);
        let engine = RoundEngine::new(catalog.level(level_index), &grid, config.timing, 0);
        log::debug!(
            "session started on a {}x{} board at level {}",
            config.side,
            config.side,
            level_index
        );
        Self {
            config,
            grid,
            catalog,
            level_index,
            generation: 0,
            engine,
            score: Score::new(),
            hint_visible: false,
        }
    }

    // Inbound

    /// Switches to the level at `index` (clamped). Staying on the active level
    /// does nothing, use [`GameSession::reset`] to replay it.
    pub fn select_level(&mut self, index: usize) -> LevelOutcome {
        let index = self.catalog.clamp_index(index);
        if index == self.level_index {
            return LevelOutcome::NoChange;
        }
        self.level_index = index;
        self.restart_round();
        LevelOutcome::Started(index)
    }

    pub fn next_level(&mut self) -> LevelOutcome {
        self.select_level(self.catalog.next_index(self.level_index))
    }

    pub fn previous_level(&mut self) -> LevelOutcome {
        self.select_level(self.catalog.previous_index(self.level_index))
    }

    pub fn toggle_selection(&mut self, index: CellIndex) -> SelectOutcome {
        if !self.grid.contains(index) {
            log::trace!("ignoring selection outside the board: {}", index);
            return SelectOutcome::NoChange;
        }
        self.engine.toggle_selection(index)
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        let outcome = self.engine.submit();
        if let SubmitOutcome::Scored(delta) = outcome {
            self.score.apply_round_result(delta);
        }
        outcome
    }

    /// Throws the current round away and replays the active level from a fresh
    /// memorize phase.
    pub fn reset(&mut self) {
        self.restart_round();
    }

    pub fn toggle_hint_visibility(&mut self) -> bool {
        self.hint_visible = !self.hint_visible;
        self.hint_visible
    }

    pub fn advance_to(&mut self, now: Millis) -> bool {
        self.engine.advance_to(now)
    }

    pub fn advance_by(&mut self, elapsed: Millis) -> bool {
        self.engine.advance_by(elapsed)
    }

    // Outbound

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn now(&self) -> Millis {
        self.engine.now()
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.engine.next_deadline()
    }

    pub fn round(&self) -> &Round {
        self.engine.round()
    }

    pub fn phase(&self) -> Phase {
        self.round().phase()
    }

    pub fn remaining_secs(&self) -> u32 {
        self.round().remaining_secs()
    }

    pub fn flash_visible(&self) -> bool {
        self.round().flash_visible()
    }

    pub fn selection(&self) -> &CellSet {
        self.round().selection()
    }

    pub fn result(&self) -> Option<&RoundResult> {
        self.round().result()
    }

    pub fn is_flashing(&self, index: CellIndex) -> bool {
        self.round().is_flashing(index)
    }

    pub fn flashing_cells(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.round().flashing_cells()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn level(&self) -> &'static Level {
        self.catalog.level(self.level_index)
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn levels(&self) -> &'static [Level] {
        self.catalog.levels()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cells(&self) -> &[Cell] {
        self.grid.cells()
    }

    pub fn side(&self) -> Coord {
        self.grid.side()
    }

    pub fn round_generation(&self) -> u64 {
        self.generation
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    fn restart_round(&mut self) {
        self.generation += 1;
        let level = self.catalog.level(self.level_index);
        self.engine
            .start(level, &self.grid, self.config.timing, self.generation);
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
