//! 시작 시 한 번 만들어 공유하는 물성 모듈 묶음.

use serde::{Deserialize, Serialize};

use crate::air::{DryAirTable, MoistAirCalculator, PsychroModel};
use crate::i18n::keys;
use crate::steam::SteamTable;
use crate::tables::Axis;
use crate::water::SaturatedWaterTable;

/// 메뉴에서 고를 수 있는 조회 모듈.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Module {
    MoistAir,
    SaturatedWater,
    Steam,
    DryAir,
}

impl Module {
    pub const ALL: [Module; 4] = [
        Module::MoistAir,
        Module::SaturatedWater,
        Module::Steam,
        Module::DryAir,
    ];

    pub fn heading_key(&self) -> &'static str {
        match self {
            Module::MoistAir => keys::HEADING_MOIST_AIR,
            Module::SaturatedWater => keys::HEADING_SATURATED_WATER,
            Module::Steam => keys::HEADING_STEAM,
            Module::DryAir => keys::HEADING_DRY_AIR,
        }
    }

    /// 표 조회 모듈이 지원하는 축. 습공기는 표가 없으므로 비어 있다.
    pub fn axes(&self) -> &'static [Axis] {
        match self {
            Module::MoistAir => &[],
            Module::SaturatedWater | Module::Steam => &[Axis::Temperature, Axis::Pressure],
            Module::DryAir => &[Axis::Temperature],
        }
    }
}

/// 네 가지 물성 모듈. 생성 후 읽기 전용이라 `&PropertyTables`를 여러 스레드에서 공유해도 된다.
#[derive(Debug, Clone)]
pub struct PropertyTables {
    pub moist_air: MoistAirCalculator<PsychroModel>,
    pub saturated_water: SaturatedWaterTable,
    pub steam: SteamTable,
    pub dry_air: DryAirTable,
}

impl PropertyTables {
    pub fn new(model: PsychroModel) -> Self {
        Self {
            moist_air: MoistAirCalculator::with_provider(model),
            saturated_water: SaturatedWaterTable::new(),
            steam: SteamTable::new(),
            dry_air: DryAirTable::new(),
        }
    }
}

impl Default for PropertyTables {
    fn default() -> Self {
        Self::new(PsychroModel::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn bundle_is_shareable() {
        assert_send_sync::<PropertyTables>();
    }

    #[test]
    fn axes_match_tables() {
        let tables = PropertyTables::default();
        for module in Module::ALL {
            for &axis in module.axes() {
                let ok = match module {
                    Module::SaturatedWater => tables.saturated_water.range(axis).is_some(),
                    Module::Steam => tables.steam.range(axis).is_some(),
                    Module::DryAir => tables.dry_air.query(axis, 20.0).is_ok(),
                    Module::MoistAir => false,
                };
                assert!(ok, "{module:?} {axis}");
            }
        }
    }
}
