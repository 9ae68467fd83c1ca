use super::model::{hoy, Estilo, Festival, Mes};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AgendaError {
    #[error("no festivals scheduled in {0}")]
    MesSinFestivales(Mes),
}

/**
Festivals grouped by month.

Only months holding at least one festival are kept, and they come out in
calendar order. Within a month, festivals are ordered by name ignoring case,
and a new festival goes before any existing one with an equal name.
*/
#[derive(Debug, Default, Clone)]
pub struct AgendaFestivales {
    agenda: BTreeMap<Mes, Vec<Festival>>,
}

impl AgendaFestivales {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_festival(&mut self, festival: Festival) {
        let festivales = self.agenda.entry(festival.mes()).or_default();
        let posicion = posicion_de_insercion(festivales, &festival);

        festivales.insert(posicion, festival);
    }

    pub fn festivales_en_mes(&self, mes: Mes) -> usize {
        self.agenda.get(&mes).map_or(0, Vec::len)
    }

    pub fn festivales_por_estilo(&self) -> BTreeMap<Estilo, BTreeSet<String>> {
        let mut por_estilo: BTreeMap<Estilo, BTreeSet<String>> = BTreeMap::new();

        for festival in self.agenda.values().flatten() {
            for estilo in festival.estilos() {
                por_estilo
                    .entry(*estilo)
                    .or_default()
                    .insert(festival.nombre().to_string());
            }
        }

        por_estilo
    }

    /// Cancels the festivals of `mes` held at any of `lugares`, as of today.
    pub fn cancelar_festivales(
        &mut self,
        lugares: &HashSet<String>,
        mes: Mes,
    ) -> Result<usize, AgendaError> {
        self.cancelar_festivales_en(lugares, mes, hoy())
    }

    /**
    Removes every festival of `mes` whose venue is in `lugares` (ignoring case)
    and that hasn't concluded by `hoy`. Returns how many were removed.

    The month is dropped from the agenda when no festival is left in it.
    */
    pub fn cancelar_festivales_en(
        &mut self,
        lugares: &HashSet<String>,
        mes: Mes,
        hoy: NaiveDate,
    ) -> Result<usize, AgendaError> {
        let Some(festivales) = self.agenda.get_mut(&mes) else {
            return Err(AgendaError::MesSinFestivales(mes));
        };

        let lugares: HashSet<String> = lugares
            .iter()
            .map(|lugar| lugar.trim().to_uppercase())
            .collect();
        let antes = festivales.len();

        festivales.retain(|festival| {
            !(lugares.contains(festival.lugar()) && !festival.ha_concluido_en(hoy))
        });

        let borrados = antes - festivales.len();

        if festivales.is_empty() {
            self.agenda.remove(&mes);
        }

        Ok(borrados)
    }

    /// Festivals of `mes` in agenda order
    pub fn festivales(&self, mes: Mes) -> &[Festival] {
        self.agenda
            .get(&mes)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn meses(&self) -> impl Iterator<Item = Mes> + '_ {
        self.agenda.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Mes, &[Festival])> + '_ {
        self.agenda
            .iter()
            .map(|(mes, festivales)| (*mes, festivales.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.agenda.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.agenda.is_empty()
    }
}

fn comparar_nombres(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

// first slot whose name doesn't sort before the new one
fn posicion_de_insercion(festivales: &[Festival], festival: &Festival) -> usize {
    festivales.partition_point(|existente| {
        comparar_nombres(existente.nombre(), festival.nombre()) == Ordering::Less
    })
}
