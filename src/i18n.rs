use serde::{Deserialize, Serialize};

use crate::billing::Utility;

/// Display language for labels. Calculations never depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    #[value(name = "en")]
    English,
    #[serde(rename = "ar")]
    #[value(name = "ar")]
    Arabic,
}

impl Language {
    pub fn toggle(self) -> Self {
        match self {
            Language::English => Language::Arabic,
            Language::Arabic => Language::English,
        }
    }

    pub fn texts(self) -> &'static Texts {
        match self {
            Language::English => &EN,
            Language::Arabic => &AR,
        }
    }
}

/// Label table for one language
#[derive(Debug)]
pub struct Texts {
    pub title: &'static str,
    pub electricity: &'static str,
    pub water: &'static str,
    pub fuel: &'static str,
    pub results: &'static str,
    pub old_bill: &'static str,
    pub new_bill: &'static str,
    pub difference: &'static str,
    pub increase: &'static str,
    pub kwh_used: &'static str,
    pub m3_used: &'static str,
    pub liters_used: &'static str,
    pub bill_input: &'static str,
    pub usage_input: &'static str,
    pub liters_input: &'static str,
    pub usage_axis: &'static str,
    pub slab_legend: &'static str,
    pub slab_names: [&'static str; 3],
    pub currency: &'static str,
}

static EN: Texts = Texts {
    title: "Bahrain Utility Tariff Calculator",
    electricity: "⚡ EWA Residential Electricity Tariff",
    water: "💧 EWA Residential Water Tariff",
    fuel: "⛽ Fuel Tariff",
    results: "📊 Results",
    old_bill: "Previous bill",
    new_bill: "Current bill",
    difference: "Difference",
    increase: "Increase %",
    kwh_used: "Units consumed",
    m3_used: "Cubic meters used",
    liters_used: "Liters used",
    bill_input: "Previous bill (BHD)",
    usage_input: "Consumption",
    liters_input: "liters",
    usage_axis: "Usage",
    slab_legend: "Slab",
    slab_names: ["First slab", "Second slab", "Third slab"],
    currency: "BHD",
};

static AR: Texts = Texts {
    title: "حاسبة التعرفة الكهربائية، المائية والبترولية – البحرين",
    electricity: "⚡ التعرفة الكهربائية للمنزل",
    water: "💧 التعرفة المائية للمنزل",
    fuel: "⛽ تعرفة الوقود",
    results: "📊 النتائج",
    old_bill: "الفاتورة السابقة",
    new_bill: "الفاتورة الجديدة",
    difference: "الفرق",
    increase: "نسبة الزيادة %",
    kwh_used: "عدد الوحدات المستخدمة",
    m3_used: "عدد المتر المكعب المستخدم",
    liters_used: "عدد اللترات المستخدمة",
    bill_input: "قيمة الفاتورة السابقة (د.ب)",
    usage_input: "الاستهلاك",
    liters_input: "لتر",
    usage_axis: "الاستهلاك",
    slab_legend: "الشريحة",
    slab_names: ["الشريحة الأولى", "الشريحة الثانية", "الشريحة الثالثة"],
    currency: "BHD",
};

impl Texts {
    /// Tab heading for a utility
    pub fn utility_title(&self, utility: Utility) -> &'static str {
        match utility {
            Utility::Electricity => self.electricity,
            Utility::Water => self.water,
            Utility::Fuel => self.fuel,
        }
    }

    /// Label for the total-usage line
    pub fn usage_label(&self, utility: Utility) -> &'static str {
        match utility {
            Utility::Electricity => self.kwh_used,
            Utility::Water => self.m3_used,
            Utility::Fuel => self.liters_used,
        }
    }

    /// Slab name for the legend; tables longer than three slabs get numbered names
    pub fn slab_name(&self, index: usize) -> String {
        match self.slab_names.get(index) {
            Some(name) => name.to_string(),
            None => format!("{} {}", self.slab_legend, index + 1),
        }
    }
}
