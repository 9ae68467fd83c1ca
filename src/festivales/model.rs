use chrono::{Datelike, Days, Local, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

/// Calendar months, in calendar order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mes {
    Enero,
    Febrero,
    Marzo,
    Abril,
    Mayo,
    Junio,
    Julio,
    Agosto,
    Septiembre,
    Octubre,
    Noviembre,
    Diciembre,
}

const MESES: [Mes; 12] = [
    Mes::Enero,
    Mes::Febrero,
    Mes::Marzo,
    Mes::Abril,
    Mes::Mayo,
    Mes::Junio,
    Mes::Julio,
    Mes::Agosto,
    Mes::Septiembre,
    Mes::Octubre,
    Mes::Noviembre,
    Mes::Diciembre,
];

impl Mes {
    pub fn de_fecha(fecha: NaiveDate) -> Self {
        MESES[fecha.month0() as usize]
    }

    /// Lowercase three-letter form, e.g. `ene`, `feb`
    pub fn abreviatura(&self) -> String {
        let nombre: &'static str = self.into();

        nombre[..3].to_lowercase()
    }
}

impl From<NaiveDate> for Mes {
    fn from(fecha: NaiveDate) -> Self {
        Mes::de_fecha(fecha)
    }
}

/// Festival categories. Declaration order is the iteration order of every
/// per-style index.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Estilo {
    Rock,
    Pop,
    Indie,
    Fusion,
    Rap,
    Electronica,
    Punk,
    Blues,
    #[strum(to_string = "HIPHOP", serialize = "hip-hop")]
    Hiphop,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FestivalError {
    #[error("festival name is empty")]
    NombreVacio,
    #[error("venue of '{0}' is empty")]
    LugarVacio(String),
    #[error("duration of '{0}' must be at least one day")]
    DuracionNula(String),
    #[error("'{0}' has no styles")]
    SinEstilos(String),
}

/// Where a festival stands relative to a reference day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Estado {
    Proximo { dias: i64 },
    EnCurso,
    Concluido,
}

/// A scheduled festival.
///
/// Identity fields are fixed at construction. The style set can only grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Festival {
    nombre: String,
    lugar: String,
    fecha_inicio: NaiveDate,
    duracion: u32,
    estilos: BTreeSet<Estilo>,
}

impl Festival {
    /// Builds a festival, uppercasing the venue.
    pub fn new(
        nombre: impl Into<String>,
        lugar: &str,
        fecha_inicio: NaiveDate,
        duracion: u32,
        estilos: impl IntoIterator<Item = Estilo>,
    ) -> Result<Self, FestivalError> {
        let nombre = nombre.into().trim().to_string();
        if nombre.is_empty() {
            return Err(FestivalError::NombreVacio);
        }

        let lugar = lugar.trim().to_uppercase();
        if lugar.is_empty() {
            return Err(FestivalError::LugarVacio(nombre));
        }

        if duracion == 0 {
            return Err(FestivalError::DuracionNula(nombre));
        }

        let estilos: BTreeSet<Estilo> = estilos.into_iter().collect();
        if estilos.is_empty() {
            return Err(FestivalError::SinEstilos(nombre));
        }

        Ok(Self {
            nombre,
            lugar,
            fecha_inicio,
            duracion,
            estilos,
        })
    }

    pub fn nombre(&self) -> &str {
        &self.nombre
    }

    pub fn lugar(&self) -> &str {
        &self.lugar
    }

    pub fn fecha_inicio(&self) -> NaiveDate {
        self.fecha_inicio
    }

    pub fn duracion(&self) -> u32 {
        self.duracion
    }

    pub fn estilos(&self) -> &BTreeSet<Estilo> {
        &self.estilos
    }

    pub fn add_estilo(&mut self, estilo: Estilo) {
        self.estilos.insert(estilo);
    }

    pub fn mes(&self) -> Mes {
        Mes::de_fecha(self.fecha_inicio)
    }

    /// Last day of the festival (a one-day festival ends on its start date)
    pub fn fecha_fin(&self) -> NaiveDate {
        self.fecha_inicio
            .checked_add_days(Days::new(u64::from(self.duracion - 1)))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn empieza_antes_que(&self, otro: &Festival) -> bool {
        self.fecha_inicio < otro.fecha_inicio
    }

    pub fn empieza_despues_que(&self, otro: &Festival) -> bool {
        self.fecha_inicio > otro.fecha_inicio
    }

    pub fn ha_concluido(&self) -> bool {
        self.ha_concluido_en(hoy())
    }

    pub fn ha_concluido_en(&self, hoy: NaiveDate) -> bool {
        self.fecha_fin() < hoy
    }

    pub fn estado(&self, hoy: NaiveDate) -> Estado {
        if hoy < self.fecha_inicio {
            Estado::Proximo {
                dias: (self.fecha_inicio - hoy).num_days(),
            }
        } else if self.ha_concluido_en(hoy) {
            Estado::Concluido
        } else {
            Estado::EnCurso
        }
    }
}

/// Current local date
pub fn hoy() -> NaiveDate {
    Local::now().date_naive()
}
