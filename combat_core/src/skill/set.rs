use super::Skill;

/// Skills of one character, looked up by id
#[derive(Debug, Default)]
pub struct SkillSet {
    skills: Vec<Skill>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a skill; returns false if the id is taken
    pub fn insert(&mut self, skill: Skill) -> bool {
        if self.index_of(skill.id()).is_some() {
            return false;
        }
        self.skills.push(skill);
        true
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.skills.iter().position(|s| s.id() == id)
    }

    pub fn get(&self, id: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Skill> {
        self.skills.iter_mut().find(|s| s.id() == id)
    }

    pub fn by_index_mut(&mut self, index: usize) -> Option<&mut Skill> {
        self.skills.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Skill> {
        self.skills.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}
