//! Carried weapons and the drawn/sheathed toggle

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    /// Presentation handle for the weapon mesh
    #[serde(default)]
    pub template: String,
}

impl Weapon {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Weapon {
            name: name.into(),
            template: template.into(),
        }
    }
}

/// Weapons owned by a character; at most one equipped
#[derive(Debug, Clone, Default)]
pub struct WeaponInventory {
    weapons: Vec<Weapon>,
    equipped: Option<usize>,
    drawn: bool,
}

impl WeaponInventory {
    /// Inventory holding `weapons`, the first one equipped and sheathed
    pub fn new(weapons: Vec<Weapon>) -> Self {
        let equipped = if weapons.is_empty() { None } else { Some(0) };
        WeaponInventory {
            weapons,
            equipped,
            drawn: false,
        }
    }

    pub fn add(&mut self, weapon: Weapon) {
        self.weapons.push(weapon);
        if self.equipped.is_none() {
            self.equipped = Some(self.weapons.len() - 1);
        }
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    /// Switch the equipped weapon; the new one starts sheathed
    pub fn equip(&mut self, index: usize) -> bool {
        if index >= self.weapons.len() {
            return false;
        }
        self.equipped = Some(index);
        self.drawn = false;
        true
    }

    pub fn equipped(&self) -> Option<&Weapon> {
        self.equipped.and_then(|index| self.weapons.get(index))
    }

    pub fn is_drawn(&self) -> bool {
        self.drawn
    }

    /// Draw the equipped weapon; None if nothing is equipped or it is already out
    pub fn draw_equipped_weapon(&mut self) -> Option<&Weapon> {
        if self.drawn {
            return None;
        }
        let index = self.equipped?;
        self.drawn = true;
        self.weapons.get(index)
    }

    /// Put the equipped weapon away; None if it was not drawn
    pub fn sheath_equipped_weapon(&mut self) -> Option<&Weapon> {
        if !self.drawn {
            return None;
        }
        let index = self.equipped?;
        self.drawn = false;
        self.weapons.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_and_sheath() {
        let mut inventory = WeaponInventory::new(vec![Weapon::new("longsword", "mesh/longsword")]);
        assert!(!inventory.is_drawn());

        assert_eq!(inventory.draw_equipped_weapon().unwrap().name, "longsword");
        assert!(inventory.is_drawn());
        assert!(inventory.draw_equipped_weapon().is_none());

        assert!(inventory.sheath_equipped_weapon().is_some());
        assert!(inventory.sheath_equipped_weapon().is_none());
    }

    #[test]
    fn test_empty_inventory() {
        let mut inventory = WeaponInventory::default();
        assert!(inventory.draw_equipped_weapon().is_none());
        assert!(!inventory.is_drawn());

        inventory.add(Weapon::new("dagger", ""));
        assert_eq!(inventory.equipped().unwrap().name, "dagger");
    }

    #[test]
    fn test_equip_sheathes() {
        let mut inventory =
            WeaponInventory::new(vec![Weapon::new("sword", ""), Weapon::new("spear", "")]);
        inventory.draw_equipped_weapon();

        assert!(inventory.equip(1));
        assert!(!inventory.is_drawn());
        assert_eq!(inventory.equipped().unwrap().name, "spear");
        assert!(!inventory.equip(5));
    }
}
