//! Progression component — core stats, level/XP, derived stats, ресурсы
//!
//! Владелец единственный мутирует свои поля; извне урон приходит только
//! через Damageable (см. combat::damage). Все мутации кладут notes в outbox,
//! система drain_progression_notes конвертирует их в Bevy events для UI.

use bevy::prelude::*;

use crate::components::CoreStats;
use crate::progression::class_data::ClassData;

/// XP curve: xp_to_next растёт ×1.15 (ceil) за уровень
const XP_CURVE_FACTOR: f32 = 1.15;
const INITIAL_XP_TO_NEXT: f32 = 100.0;

/// Исходящая нотификация для UI/эффектов
///
/// Outbox очищается каждый тик (см. systems::drain_progression_notes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressionNote {
    /// (current, max)
    Health(f32, f32),
    /// (current, max)
    Mana(f32, f32),
    /// Новый уровень
    LevelUp(u32),
    Died,
}

/// Character progression: статы, уровень, здоровье/мана
///
/// Инварианты:
/// - 0 ≤ current_health ≤ max_health
/// - 0 ≤ current_mana ≤ max_mana
/// - level ≥ 1, xp ≥ 0, xp_to_next > 0
#[derive(Component, Debug, Clone)]
pub struct Progression {
    /// None ⇒ unconfigured degraded state (класс не назначен при спавне)
    class: Option<ClassData>,

    pub level: u32,
    pub xp: f32,
    pub xp_to_next: f32,

    /// base + накопленный level growth
    pub core_stats: CoreStats,
    /// Внешние аддитивные модификаторы (items/upgrades)
    pub bonus_stats: CoreStats,

    // Derived (пересчитываются, не мутировать напрямую)
    pub max_health: f32,
    pub max_mana: f32,
    pub move_speed: f32,

    pub current_health: f32,
    pub current_mana: f32,

    /// Death hook сработал (ровно один раз на zero-crossing)
    died: bool,

    notes: Vec<ProgressionNote>,
}

impl Progression {
    /// Инициализация из class data на уровне `level`
    ///
    /// core_stats = base + (level-1) × growth; ресурсы заполняются до max.
    /// Без class data — degraded state: derived статы не считаются,
    /// предупреждение в лог, не fatal.
    pub fn new(class: Option<ClassData>, level: u32) -> Self {
        let level = level.max(1);

        let mut progression = Self {
            class: None,
            level,
            xp: 0.0,
            xp_to_next: INITIAL_XP_TO_NEXT,
            core_stats: CoreStats::ZERO,
            bonus_stats: CoreStats::ZERO,
            max_health: 0.0,
            max_mana: 0.0,
            move_speed: 0.0,
            current_health: 0.0,
            current_mana: 0.0,
            died: false,
            notes: Vec::new(),
        };

        let Some(class) = class else {
            crate::log_warning("Progression spawned without class data, degraded state");
            return progression;
        };

        progression.core_stats = class
            .base_stats
            .with_growth(class.per_level_stats, level as i32 - 1);
        progression.class = Some(class);

        progression.recalculate_derived();
        progression.current_health = progression.max_health;
        progression.current_mana = progression.max_mana;
        progression.push_resource_notes();

        progression
    }

    pub fn is_configured(&self) -> bool {
        self.class.is_some()
    }

    pub fn class(&self) -> Option<&ClassData> {
        self.class.as_ref()
    }

    pub fn is_alive(&self) -> bool {
        !self.died
    }

    /// Пересчёт derived статов из core + bonus
    ///
    /// После пересчёта current ресурсы зажимаются в [0, max] — только вниз,
    /// если max уменьшился. Вызывать после любой мутации статов.
    pub fn recalculate_derived(&mut self) {
        let Some(class) = self.class.as_ref() else {
            return;
        };

        let total_str = self.core_stats.strength + self.bonus_stats.strength;
        let total_agi = self.core_stats.agility + self.bonus_stats.agility;
        let total_int = self.core_stats.intelligence + self.bonus_stats.intelligence;

        self.max_health = class.base_health + total_str as f32 * class.health_per_strength;
        self.max_mana = class.base_mana + total_int as f32 * class.mana_per_intelligence;

        let agi_multiplier = 1.0 + total_agi as f32 * class.move_speed_per_agility;
        self.move_speed = class.base_move_speed * agi_multiplier;

        self.current_health = self.current_health.clamp(0.0, self.max_health);
        self.current_mana = self.current_mana.clamp(0.0, self.max_mana);

        self.push_resource_notes();
    }

    /// Урон. amount ≤ 0 игнорируется. Ровно один Died note на zero-crossing.
    pub fn take_damage(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }

        self.current_health = (self.current_health - amount).max(0.0);
        self.notes
            .push(ProgressionNote::Health(self.current_health, self.max_health));

        if self.current_health <= 0.0 && !self.died {
            self.died = true;
            self.notes.push(ProgressionNote::Died);
        }
    }

    /// Лечение до max. amount ≤ 0 игнорируется.
    pub fn heal(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }

        self.current_health = (self.current_health + amount).min(self.max_health);
        self.notes
            .push(ProgressionNote::Health(self.current_health, self.max_health));
    }

    /// Трата маны. amount ≤ 0 тривиально успешна.
    /// Недостаточно маны ⇒ false, состояние не меняется.
    pub fn spend_mana(&mut self, amount: f32) -> bool {
        if amount <= 0.0 {
            return true;
        }
        if self.current_mana < amount {
            return false;
        }

        self.current_mana -= amount;
        self.notes
            .push(ProgressionNote::Mana(self.current_mana, self.max_mana));
        true
    }

    /// Восстановление маны до max. amount ≤ 0 игнорируется.
    pub fn restore_mana(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }

        self.current_mana = (self.current_mana + amount).min(self.max_mana);
        self.notes
            .push(ProgressionNote::Mana(self.current_mana, self.max_mana));
    }

    /// Начисление XP. Один большой award может дать несколько уровней —
    /// по одному level-up за итерацию цикла.
    pub fn gain_xp(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }

        self.xp += amount;

        while self.xp >= self.xp_to_next {
            self.xp -= self.xp_to_next;
            self.level_up();
        }
    }

    /// Один шаг level-up: +1 уровень, один инкремент growth, кривая ×1.15,
    /// пересчёт derived, ресурсы до max (full refill на уровень — intended)
    fn level_up(&mut self) {
        self.level += 1;

        if let Some(class) = self.class.as_ref() {
            let growth = class.per_level_stats;
            self.core_stats.add(growth);
        }

        self.xp_to_next = (self.xp_to_next * XP_CURVE_FACTOR).ceil();

        self.recalculate_derived();
        self.current_health = self.max_health;
        self.current_mana = self.max_mana;
        self.push_resource_notes();

        self.notes.push(ProgressionNote::LevelUp(self.level));
    }

    /// Аддитивные bonus stats (items/upgrades) + пересчёт derived
    pub fn add_bonus_stats(&mut self, delta: CoreStats) {
        self.bonus_stats.add(delta);
        self.recalculate_derived();
    }

    /// Забрать накопленные notes (outbox опустошается)
    pub fn drain_notes(&mut self) -> Vec<ProgressionNote> {
        std::mem::take(&mut self.notes)
    }

    #[cfg(test)]
    pub fn notes(&self) -> &[ProgressionNote] {
        &self.notes
    }

    fn push_resource_notes(&mut self) {
        self.notes
            .push(ProgressionNote::Health(self.current_health, self.max_health));
        self.notes
            .push(ProgressionNote::Mana(self.current_mana, self.max_mana));
    }
}
