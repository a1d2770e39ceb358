use crate::errors::GameError;
use crate::units::Unit;

/// Returns `true` when `attacker` destroys `defender`.
///
/// Rules apply in priority order:
///
/// 1. An empty slot can neither attack nor be attacked.
/// 2. Arrow takes everything and everything takes Arrow.
/// 3. Otherwise the fixed cycle: Axe beats Hammer, Hammer beats Sword,
///    Sword beats Axe. Any other pairing, same-type included, fails.
///
/// # Examples
///
/// ```
/// use coexist_engine::rules::can_defeat;
/// use coexist_engine::units::Unit;
///
/// assert!(can_defeat(Unit::Axe, Unit::Hammer));
/// assert!(!can_defeat(Unit::Hammer, Unit::Axe));
/// assert!(can_defeat(Unit::Sword, Unit::Arrow));
/// assert!(!can_defeat(Unit::Arrow, Unit::Empty));
/// ```
pub fn can_defeat(attacker: Unit, defender: Unit) -> bool {
    match (attacker, defender) {
        (Unit::Empty, _) | (_, Unit::Empty) => false,
        (Unit::Arrow, _) | (_, Unit::Arrow) => true,
        (Unit::Axe, Unit::Hammer) | (Unit::Hammer, Unit::Sword) | (Unit::Sword, Unit::Axe) => true,
        _ => false,
    }
}

/// Whether a successful attack between these units earns the attacker a point.
/// Kills involving an Arrow on either side never score.
pub fn awards_point(attacker: Unit, defender: Unit) -> bool {
    attacker != Unit::Arrow && defender != Unit::Arrow
}

/// Validates an attack, naming the reason when it is illegal.
///
/// # Errors
///
/// - [`GameError::EmptyAttacker`] - the attacking slot is vacant
/// - [`GameError::IllegalAttack`] - the combat rules reject the pairing
///   (including an empty defender slot)
pub fn validate_attack(attacker: Unit, defender: Unit) -> Result<(), GameError> {
    if attacker.is_empty() {
        return Err(GameError::EmptyAttacker);
    }
    if can_defeat(attacker, defender) {
        Ok(())
    } else {
        Err(GameError::IllegalAttack { attacker, defender })
    }
}
