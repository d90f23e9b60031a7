//! One-second-step economy: resources, supply, tech gating and production.
//!
//! A [`Simulator`] owns exactly one [`EconomyState`] and borrows the shared
//! [`Catalog`]. Gating failures are silent: an unaffordable or locked build
//! simply does not happen, and an identifier the catalog does not know is a
//! pure timing token.

use std::collections::BTreeMap;

use crate::catalog::{Catalog, Kind};
use crate::mechanics::econ;
use crate::systems::sdk::Hook;

pub const START_TIME: u32 = 180;
pub const START_MINERALS: f64 = 300.0;
pub const START_GAS: f64 = 200.0;
pub const START_WORKERS: u32 = 22;
pub const START_SUPPLY: u32 = 22;
pub const START_SUPPLY_CAP: u32 = 24;

/// An in-flight build: what lands and the first tick it may land on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pending {
    pub id: String,
    pub completes_at: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EconomyState {
    pub minerals: f64,
    pub gas: f64,
    /// Completed identifiers of every kind, structures included.
    pub units: BTreeMap<String, u32>,
    /// Completed structures; prerequisites are checked here.
    pub buildings: BTreeMap<String, u32>,
    pub supply: u32,
    pub supply_cap: u32,
    pub time: u32,
    /// Direct pending list (structures, tech units).
    pub pending: Vec<Pending>,
    /// Production queues keyed by the structure that trains them.
    pub queues: BTreeMap<String, Vec<Pending>>,
    /// Production structure → the upgrade that took over its queue.
    pub morphed: BTreeMap<String, String>,
}

impl EconomyState {
    /// The fixed state every evaluation starts from.
    pub fn default_start() -> Self {
        let buildings = [
            ("nexus", 1),
            ("pylon", 3),
            ("gateway", 1),
            ("cybernetics_core", 1),
            ("warp_gate", 1),
            ("assimilator", 2),
        ]
        .into_iter()
        .map(|(id, n)| (id.to_string(), n))
        .collect();
        let queues = ["gateway", "warp_gate", "robotics_facility"]
            .into_iter()
            .map(|id| (id.to_string(), Vec::new()))
            .collect();

        Self {
            minerals: START_MINERALS,
            gas: START_GAS,
            units: BTreeMap::from([("probe".to_string(), START_WORKERS)]),
            buildings,
            supply: START_SUPPLY,
            supply_cap: START_SUPPLY_CAP,
            time: START_TIME,
            pending: Vec::new(),
            queues,
            morphed: BTreeMap::new(),
        }
    }

    pub fn unit_count(&self, id: &str) -> u32 {
        self.units.get(id).copied().unwrap_or(0)
    }

    pub fn building_count(&self, id: &str) -> u32 {
        self.buildings.get(id).copied().unwrap_or(0)
    }

    /// Pending entries of one production queue (empty if it has none).
    pub fn queue(&self, producer: &str) -> &[Pending] {
        self.queues.get(producer).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Queue that currently receives units trained from `producer`.
    fn queue_key(&self, producer: &str) -> String {
        self.morphed
            .get(producer)
            .cloned()
            .unwrap_or_else(|| producer.to_string())
    }
}

impl Default for EconomyState {
    fn default() -> Self {
        Self::default_start()
    }
}

fn bump(counts: &mut BTreeMap<String, u32>, id: &str) {
    let n = counts.entry(id.to_string()).or_insert(0);
    *n = n.saturating_add(1);
}

pub struct Simulator<'c> {
    catalog: &'c Catalog,
    state: EconomyState,
}

impl<'c> Simulator<'c> {
    /// Fresh simulator at the default start.
    pub fn new(catalog: &'c Catalog) -> Self {
        Self::with_state(catalog, EconomyState::default_start())
    }

    pub fn with_state(catalog: &'c Catalog, state: EconomyState) -> Self {
        Self { catalog, state }
    }

    pub fn state(&self) -> &EconomyState {
        &self.state
    }

    pub fn into_state(self) -> EconomyState {
        self.state
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Affordable, within supply cap, and every prerequisite building present.
    pub fn can_build(&self, id: &str) -> bool {
        let Some(entry) = self.catalog.get(id) else {
            return false;
        };
        let s = &self.state;
        econ::affordable(
            s.minerals,
            s.gas,
            f64::from(entry.minerals),
            f64::from(entry.gas),
        ) && econ::has_headroom(s.supply, entry.supply, s.supply_cap)
            && entry.requires.iter().all(|r| s.building_count(r) > 0)
    }

    /// Charges the cost up front and enqueues `id`. Returns the completion
    /// time, or `None` when gating refused the build.
    pub fn issue_build(&mut self, id: &str) -> Option<u32> {
        if !self.can_build(id) {
            return None;
        }
        let catalog = self.catalog;
        let entry = catalog.get(id)?;
        let s = &mut self.state;
        s.minerals -= f64::from(entry.minerals);
        s.gas -= f64::from(entry.gas);

        let completes_at = s.time.saturating_add(entry.time);
        let pending = Pending { id: id.to_string(), completes_at };
        match &entry.trained_from {
            Some(producer) => {
                let key = s.queue_key(producer);
                s.queues.entry(key).or_default().push(pending);
            }
            None => s.pending.push(pending),
        }
        Some(completes_at)
    }

    /// One second, holding `action`.
    pub fn tick(&mut self, action: &str) {
        self.tick_with(Some(action), &mut []);
    }

    /// One second: try the held action at the current time, advance the
    /// clock, land everything due, then collect income.
    pub fn tick_with(&mut self, action: Option<&str>, hooks: &mut [Box<dyn Hook>]) {
        if let Some(id) = action {
            if let Some(completes_at) = self.issue_build(id) {
                for h in hooks.iter_mut() {
                    h.on_issue(&self.state, id, completes_at);
                }
            }
        }

        self.state.time = self.state.time.saturating_add(1);
        self.resolve_direct(hooks);
        self.resolve_queues(hooks);
        self.collect_income();

        for h in hooks.iter_mut() {
            h.on_tick(&self.state);
        }
    }

    /// Lands every due direct entry, in enqueue order.
    fn resolve_direct(&mut self, hooks: &mut [Box<dyn Hook>]) {
        let now = self.state.time;
        let (ready, waiting): (Vec<Pending>, Vec<Pending>) =
            std::mem::take(&mut self.state.pending)
                .into_iter()
                .partition(|p| p.completes_at <= now);
        self.state.pending = waiting;

        for p in ready {
            self.complete(&p.id);
            for h in hooks.iter_mut() {
                h.on_complete(&self.state, &p.id);
            }
        }
    }

    fn complete(&mut self, id: &str) {
        let catalog = self.catalog;
        let Some(entry) = catalog.get(id) else {
            tracing::warn!(target: "build_finder::sim", action = id, "pending entry left the catalog");
            return;
        };
        let s = &mut self.state;
        bump(&mut s.units, id);
        // Supply is only gated at issue time; completion may overshoot the cap.
        s.supply = s.supply.saturating_add(entry.supply);

        match entry.kind {
            Kind::SupplyStructure => {
                bump(&mut s.buildings, id);
                s.supply_cap = s.supply_cap.saturating_add(econ::SUPPLY_PER_STRUCTURE);
            }
            Kind::ProductionStructure => {
                bump(&mut s.buildings, id);
                if let Some(queue) = s.queues.get_mut(id) {
                    queue.clear();
                }
            }
            Kind::UpgradeStructure => {
                if let Some(source) = &entry.morphs_from {
                    self.morph(source, id);
                }
            }
            Kind::Structure | Kind::GasStructure => bump(&mut s.buildings, id),
            Kind::Worker | Kind::CombatUnit => {}
        }
    }

    /// Swaps one `source` building for `target` and hands over the source
    /// queue. All or nothing: without a source building nothing moves.
    fn morph(&mut self, source: &str, target: &str) {
        let s = &mut self.state;
        let Some(count) = s.buildings.get_mut(source).filter(|n| **n > 0) else {
            tracing::debug!(
                target: "build_finder::sim",
                source,
                target,
                time = s.time,
                "morph.skipped=no_source"
            );
            return;
        };
        *count -= 1;
        bump(&mut s.buildings, target);

        let moved = s.queues.remove(source).unwrap_or_default();
        s.queues.entry(target.to_string()).or_default().extend(moved);
        s.morphed.insert(source.to_string(), target.to_string());
    }

    /// At most one due entry per production queue per tick.
    fn resolve_queues(&mut self, hooks: &mut [Box<dyn Hook>]) {
        let now = self.state.time;
        let mut landed = Vec::new();
        for queue in self.state.queues.values_mut() {
            if let Some(pos) = queue.iter().position(|p| p.completes_at <= now) {
                landed.push(queue.remove(pos).id);
            }
        }
        for id in landed {
            // Queue-trained units add to the army only; supply is untouched.
            bump(&mut self.state.units, &id);
            for h in hooks.iter_mut() {
                h.on_complete(&self.state, &id);
            }
        }
    }

    fn collect_income(&mut self) {
        let catalog = self.catalog;
        let s = &mut self.state;
        let workers: u32 = s
            .units
            .iter()
            .filter(|(id, _)| catalog.get(id).is_some_and(|e| e.kind == Kind::Worker))
            .map(|(_, n)| *n)
            .sum();
        // Only extractors completed during the run mine; the starting ones do not.
        let extractors: u32 = s
            .units
            .iter()
            .filter(|(id, _)| catalog.get(id).is_some_and(|e| e.kind == Kind::GasStructure))
            .map(|(_, n)| *n)
            .sum();
        s.minerals += econ::income(workers, econ::MINERALS_PER_WORKER);
        s.gas += econ::income(extractors, econ::GAS_PER_EXTRACTOR);
    }
}
