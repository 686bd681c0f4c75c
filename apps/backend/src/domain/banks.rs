//! Banks offering leasing habitacional. Every listing names one of these.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bank {
    pub id: &'static str,
    pub name: &'static str,
    pub logo: &'static str,
    pub info_url: &'static str,
    pub simulator_url: &'static str,
}

pub const BANKS: &[Bank] = &[
    Bank {
        id: "davivienda",
        name: "Davivienda",
        logo: "/bank-exterior.png",
        info_url: "https://www.davivienda.com/personas/credito-de-vivienda-inmuebles/leasing-habitacional",
        simulator_url: "https://www.viviendacondavivienda.com/",
    },
    Bank {
        id: "bancolombia",
        name: "Bancolombia",
        logo: "/bank-exterior.png",
        info_url: "https://www.bancolombia.com/personas/creditos/vivienda/leasing-habitacional",
        simulator_url: "https://www.bancolombia.com/personas/simuladores",
    },
];

pub fn find_bank(id: &str) -> Option<&'static Bank> {
    BANKS.iter().find(|b| b.id == id)
}
