//! Immutable simulation context.
//!
//! Persons are grouped once into SPM units, and the closed-over constants
//! (population totals, tax base, baseline poverty figures) are fixed here.
//! Every scenario evaluation reads this context and derives its own working
//! vectors; nothing is mutated between calls.

use crate::error::{SimError, SimResult};
use crate::metrics;
use crate::records::{Person, SpmId, SpmUnit};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug)]
pub struct SimContext {
    pub persons: Vec<Person>,
    /// Units ordered by ascending `spm_id`.
    pub units: Vec<SpmUnit>,
    /// `persons[i]` belongs to `units[unit_index[i]]`.
    pub unit_index: Vec<usize>,
    pub adult_pop: f64,
    pub child_pop: f64,
    pub total_pop: f64,
    /// Weighted sum of unit taxable income; the flat-tax base.
    pub total_taxable_income: f64,
    pub baseline_poverty_gap: f64,
    /// Percent of persons in units below their poverty threshold.
    pub baseline_poverty_rate: f64,
}

impl SimContext {
    pub fn from_persons(persons: Vec<Person>) -> SimResult<Self> {
        if persons.is_empty() {
            return Err(SimError::EmptyInput);
        }

        let mut by_id: BTreeMap<SpmId, SpmUnit> = BTreeMap::new();
        for p in &persons {
            let unit = by_id.entry(p.spm_id).or_insert_with(|| SpmUnit {
                spm_id: p.spm_id,
                weight: p.spm_weight,
                threshold: p.spm_threshold,
                resources: p.spm_resources,
                size: p.spm_numper,
                children: 0.0,
                adults: 0.0,
                taxable_income: 0.0,
            });
            if p.is_child {
                unit.children += 1.0;
            } else {
                unit.adults += 1.0;
            }
            unit.taxable_income += p.taxable_income;
        }
        let units: Vec<SpmUnit> = by_id.into_values().collect();

        let index_of: HashMap<SpmId, usize> = units
            .iter()
            .enumerate()
            .map(|(i, u)| (u.spm_id, i))
            .collect();
        let unit_index: Vec<usize> = persons.iter().map(|p| index_of[&p.spm_id]).collect();

        let adult_pop: f64 = persons
            .iter()
            .filter(|p| p.is_adult)
            .map(|p| p.weight)
            .sum();
        let child_pop: f64 = persons
            .iter()
            .filter(|p| p.is_child)
            .map(|p| p.weight)
            .sum();
        if adult_pop <= 0.0 {
            return Err(SimError::EmptyPopulation("adult"));
        }
        if child_pop <= 0.0 {
            return Err(SimError::EmptyPopulation("child"));
        }
        let total_pop = adult_pop + child_pop;

        let total_taxable_income: f64 = units.iter().map(|u| u.taxable_income * u.weight).sum();

        let baseline_resources: Vec<f64> = units.iter().map(|u| u.resources).collect();
        let baseline_poverty_gap = metrics::poverty_gap(&units, &baseline_resources);
        let baseline_poor: f64 = persons
            .iter()
            .zip(&unit_index)
            .filter(|(_, &ui)| units[ui].resources < units[ui].threshold)
            .map(|(p, _)| p.weight)
            .sum();
        let baseline_poverty_rate = baseline_poor / total_pop * 100.0;

        log::info!(
            "Context: {} units, adult_pop={:.0}, child_pop={:.0}, tax base={:.3e}",
            units.len(),
            adult_pop,
            child_pop,
            total_taxable_income
        );

        Ok(SimContext {
            persons,
            units,
            unit_index,
            adult_pop,
            child_pop,
            total_pop,
            total_taxable_income,
            baseline_poverty_gap,
            baseline_poverty_rate,
        })
    }

    /// Small three-unit fixture for unit and integration tests.
    pub fn default_test() -> Self {
        fn person(
            spm_id: SpmId,
            age: f64,
            taxable_income: f64,
            weight: f64,
            threshold: f64,
            resources: f64,
            size: f64,
        ) -> Person {
            Person {
                spm_id,
                weight,
                age,
                taxable_income,
                is_child: age < 18.0,
                is_adult: age >= 18.0,
                spm_weight: weight,
                spm_threshold: threshold,
                spm_resources: resources,
                spm_numper: size,
            }
        }

        // Unit 1: two adults + one child, below its threshold.
        // Unit 2: two adults, comfortably above.
        // Unit 3: one adult + three children, below.
        let persons = vec![
            person(1, 35.0, 12_000.0, 10.0, 20_000.0, 15_000.0, 3.0),
            person(1, 33.0, 3_000.0, 10.0, 20_000.0, 15_000.0, 3.0),
            person(1, 5.0, 0.0, 10.0, 20_000.0, 15_000.0, 3.0),
            person(2, 45.0, 50_000.0, 20.0, 25_000.0, 60_000.0, 2.0),
            person(2, 44.0, 10_000.0, 20.0, 25_000.0, 60_000.0, 2.0),
            person(3, 28.0, 8_000.0, 5.0, 18_000.0, 10_000.0, 4.0),
            person(3, 3.0, 0.0, 5.0, 18_000.0, 10_000.0, 4.0),
            person(3, 6.0, 0.0, 5.0, 18_000.0, 10_000.0, 4.0),
            person(3, 9.0, 0.0, 5.0, 18_000.0, 10_000.0, 4.0),
        ];
        SimContext::from_persons(persons).expect("test fixture is valid")
    }
}
