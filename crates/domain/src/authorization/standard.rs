//! Standard rule-sets, built once at start-up and shared read-only.
//!
//! Each pairs a capability with the administrative override so that admin
//! bypass is uniform across every privileged action.

use std::sync::Arc;

use super::predicates::{
    CanSeeArmy, CanSeeFief, HeadOfFamily, IsAdmin, IsAlive, IsHeirApparent, IsHerald, IsMonarch,
    OverlordOfFief, OwnsArmy, OwnsCharacter, OwnsCharacterNotCaptured, OwnsFief, OwnsPlace,
    Predicate,
};
use super::rule_set::RuleSet;

fn admin() -> Arc<dyn Predicate> {
    Arc::new(IsAdmin)
}

#[derive(Debug, Clone)]
pub struct StandardRuleSets {
    /// Command, split or disband an army.
    pub army_control: RuleSet,
    /// Tax, build in, or garrison a fief.
    pub fief_management: RuleSet,
    /// Act on a vassal's fief as its overlord.
    pub fief_overlordship: RuleSet,
    /// Manage any kind of place one owns.
    pub place_management: RuleSet,
    pub character_control: RuleSet,
    /// Give orders that require the character to be free.
    pub character_command: RuleSet,
    pub family_management: RuleSet,
    pub fief_visibility: RuleSet,
    pub army_visibility: RuleSet,
    pub royal_decree: RuleSet,
    pub heraldry: RuleSet,
    pub succession: RuleSet,
    /// Any living actor may lodge an ownership challenge.
    pub lodge_challenge: RuleSet,
    pub admin_only: RuleSet,
}

impl StandardRuleSets {
    pub fn new() -> Self {
        Self {
            army_control: RuleSet::any_of("army_control", OwnsArmy, [admin()]),
            fief_management: RuleSet::any_of("fief_management", OwnsFief, [admin()]),
            fief_overlordship: RuleSet::any_of("fief_overlordship", OverlordOfFief, [admin()]),
            place_management: RuleSet::any_of("place_management", OwnsPlace, [admin()]),
            character_control: RuleSet::any_of("character_control", OwnsCharacter, [admin()]),
            character_command: RuleSet::any_of(
                "character_command",
                OwnsCharacterNotCaptured,
                [admin()],
            ),
            family_management: RuleSet::any_of("family_management", HeadOfFamily, [admin()]),
            fief_visibility: RuleSet::any_of("fief_visibility", CanSeeFief, [admin()]),
            army_visibility: RuleSet::any_of("army_visibility", CanSeeArmy, [admin()]),
            royal_decree: RuleSet::any_of("royal_decree", IsMonarch, [admin()]),
            heraldry: RuleSet::any_of("heraldry", IsHerald, [admin()]),
            succession: RuleSet::any_of(
                "succession",
                IsHeirApparent,
                [Arc::new(IsMonarch) as Arc<dyn Predicate>, admin()],
            ),
            lodge_challenge: RuleSet::single("lodge_challenge", IsAlive),
            admin_only: RuleSet::single("admin_only", IsAdmin),
        }
    }
}

impl Default for StandardRuleSets {
    fn default() -> Self {
        Self::new()
    }
}
