//! Shop rules on top of the engine's raw commands
//!
//! Prices are checked and paid here, then the purchase or feed is applied and
//! the countdown gets its bonus seconds. Nothing is charged if the engine
//! rejects the command.

use serde::Serialize;

use crate::engine::Engine;
use crate::error::{CommandError, CommandResult};
use crate::events::NotificationSink;
use crate::sim::{SessionPhase, Species};

/// One species button in the shop panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShopOffer {
    pub species: Species,
    pub cost: u64,
    /// Score covers the price
    pub affordable: bool,
    /// Unlocked, not yet bought, nothing else being raised
    pub available: bool,
}

pub struct Shop;

impl Shop {
    /// Pay for and buy a species
    pub fn buy_species<S: NotificationSink>(
        engine: &mut Engine<S>,
        species: Species,
    ) -> CommandResult {
        let cost = species.cost();
        Self::check_funds(engine, cost)?;
        engine.try_purchase_species(species)?;
        Self::charge(engine, cost);
        Ok(())
    }

    /// Pay for and serve one portion to the current species. Returns the new feed count.
    pub fn buy_food<S: NotificationSink>(engine: &mut Engine<S>) -> CommandResult<u32> {
        let cost = engine.tuning().food_cost;
        Self::check_funds(engine, cost)?;
        let species = engine
            .state()
            .aquarium
            .current()
            .ok_or(CommandError::NoCurrentSpecies)?;
        let feed_count = engine.try_feed_species(species)?;
        Self::charge(engine, cost);
        Ok(feed_count)
    }

    /// Species buttons for the shop panel, in chain order
    pub fn offers<S: NotificationSink>(engine: &Engine<S>) -> Vec<ShopOffer> {
        let aquarium = &engine.state().aquarium;
        let nothing_current = aquarium.current().is_none();
        Species::ALL
            .into_iter()
            .map(|species| {
                let fish = aquarium.get(species);
                ShopOffer {
                    species,
                    cost: species.cost(),
                    affordable: engine.score() >= species.cost(),
                    available: nothing_current && fish.unlocked() && !fish.evolved(),
                }
            })
            .collect()
    }

    fn check_funds<S: NotificationSink>(engine: &Engine<S>, cost: u64) -> CommandResult {
        if engine.phase() != SessionPhase::Playing {
            return Err(CommandError::NotPlaying);
        }
        let score = engine.score();
        if score < cost {
            return Err(CommandError::InsufficientFunds { cost, score });
        }
        Ok(())
    }

    fn charge<S: NotificationSink>(engine: &mut Engine<S>, cost: u64) {
        engine.set_score(engine.score().saturating_sub(cost));
        let bonus = engine.tuning().time_bonus(cost);
        engine.set_time_remaining(engine.time_remaining().saturating_add(bonus));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn playing() -> Engine {
        let mut engine = Engine::headless(Tuning::default(), ());
        engine.start_game();
        engine
    }

    #[test]
    fn test_buy_species_charges_and_adds_time() {
        let mut engine = playing();
        engine.set_score(120);
        assert_eq!(Shop::buy_species(&mut engine, Species::FishyBoi), Ok(()));
        assert_eq!(engine.score(), 70);
        assert_eq!(engine.time_remaining(), 35);
    }

    #[test]
    fn test_insufficient_funds_changes_nothing() {
        let mut engine = playing();
        engine.set_score(49);
        assert_eq!(
            Shop::buy_species(&mut engine, Species::FishyBoi),
            Err(CommandError::InsufficientFunds { cost: 50, score: 49 })
        );
        assert_eq!(engine.score(), 49);
        assert_eq!(engine.state().aquarium.current(), None);
    }

    #[test]
    fn test_rejected_purchase_is_free() {
        let mut engine = playing();
        engine.set_score(10_000);
        assert_eq!(
            Shop::buy_species(&mut engine, Species::Speedy),
            Err(CommandError::Locked(Species::Speedy))
        );
        assert_eq!(engine.score(), 10_000);
    }

    #[test]
    fn test_buy_food() {
        let mut engine = playing();
        engine.set_score(200);
        assert_eq!(Shop::buy_food(&mut engine), Err(CommandError::NoCurrentSpecies));
        Shop::buy_species(&mut engine, Species::FishyBoi).unwrap();
        assert_eq!(Shop::buy_food(&mut engine), Ok(1));
        assert_eq!(engine.score(), 100);
    }

    #[test]
    fn test_offers() {
        let mut engine = playing();
        engine.set_score(300);
        let offers = Shop::offers(&engine);
        assert_eq!(offers.len(), Species::COUNT);
        assert!(offers[0].available && offers[0].affordable);
        assert!(!offers[1].available && offers[1].affordable);
        assert!(!offers[2].affordable);
    }
}
