//! The yaku (役) catalog.
//!
//! [`Yaku`] is the unifying key for every pattern this engine knows,
//! used instead of strings everywhere. Detection lives in
//! [`detectors`](crate::yaku::detectors); values returned there already
//! account for closed/open differences.

pub mod context;
pub mod detectors;

pub use context::HandContext;
pub use detectors::detect_all;

/// Every pattern known to this engine. Variant names double as the stable,
/// language-neutral catalog identifiers in score results and logs;
/// localization is a consumer concern.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord,
    strum::Display, strum::IntoStaticStr, strum::EnumIter,
    serde::Serialize, serde::Deserialize,
)]
#[non_exhaustive]
pub enum Yaku {
    // -- regular --
    /// 立直
    Riichi,
    /// 両立直
    DoubleRiichi,
    /// 一発
    Ippatsu,
    /// 門前清自摸和
    MenzenTsumo,
    /// 断幺九
    Tanyao,
    /// 平和
    Pinfu,
    /// 一盃口
    Iipeikou,
    /// 二盃口
    Ryanpeikou,
    /// 自風
    SeatWind,
    /// 場風
    PrevalentWind,
    /// 役牌 白
    Haku,
    /// 役牌 發
    Hatsu,
    /// 役牌 中
    Chun,
    /// 海底摸月
    Haitei,
    /// 河底撈魚
    Houtei,
    /// 嶺上開花
    Rinshan,
    /// 槍槓
    Chankan,
    /// 混全帯幺九
    Chanta,
    /// 純全帯幺九
    Junchan,
    /// 一気通貫
    Ittsu,
    /// 三色同順
    SanshokuDoujun,
    /// 三色同刻
    SanshokuDoukou,
    /// 対々和
    Toitoi,
    /// 三暗刻
    Sanankou,
    /// 混老頭
    Honroutou,
    /// 小三元
    Shousangen,
    /// 七対子
    Chiitoitsu,
    /// 混一色
    Honitsu,
    /// 清一色
    Chinitsu,

    // -- yakuman --
    /// 四暗刻
    Suuankou,
    /// 大三元
    Daisangen,
    /// 小四喜
    Shousuushii,
    /// 大四喜
    Daisuushii,
    /// 字一色
    Tsuuiisou,
    /// 清老頭
    Chinroutou,
    /// 緑一色
    Ryuuiisou,
    /// 九蓮宝燈
    Chuuren,
    /// 四槓子
    Suukantsu,
    /// 国士無双
    Kokushi,
    /// 天和
    Tenhou,
    /// 地和
    Chiihou,

    // -- counted toward han, but not real yaku --
    /// ドラ
    Dora,
    /// 裏ドラ
    UraDora,
    /// 赤ドラ
    AkaDora,
}

impl Yaku {
    /// The stable catalog identifier.
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn is_yakuman(self) -> bool {
        use Yaku::*;
        matches!(
            self,
            Suuankou | Daisangen | Shousuushii | Daisuushii | Tsuuiisou | Chinroutou
                | Ryuuiisou | Chuuren | Suukantsu | Kokushi | Tenhou | Chiihou
        )
    }

    /// Dora variants count toward han but never qualify a hand by
    /// themselves.
    pub fn is_real(self) -> bool {
        !matches!(self, Yaku::Dora | Yaku::UraDora | Yaku::AkaDora)
    }
}

/// Total han over a detection result.
pub fn total_han(yaku: &[(Yaku, u8)]) -> u8 {
    yaku.iter().map(|&(_, han)| han).sum()
}

/// Whether the detection result contains at least one real yaku.
pub fn has_real_yaku(yaku: &[(Yaku, u8)]) -> bool {
    yaku.iter().any(|&(y, _)| y.is_real())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn names_are_stable_identifiers() {
        check!(Yaku::Riichi.name() == "Riichi");
        check!(Yaku::SanshokuDoujun.name() == "SanshokuDoujun");
    }

    #[test]
    fn dora_is_not_real() {
        check!(!has_real_yaku(&[(Yaku::Dora, 3), (Yaku::AkaDora, 1)]));
        check!(has_real_yaku(&[(Yaku::Dora, 3), (Yaku::Tanyao, 1)]));
        check!(total_han(&[(Yaku::Dora, 3), (Yaku::Tanyao, 1)]) == 4);
    }
}
