use super::agenda::AgendaFestivales;
use super::model::{Estado, Estilo, Festival, Mes};
use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

const SEPARATOR: &str = "----------------";

impl Festival {
    /// Multi-line report of the festival as seen on `hoy`
    pub fn informe(&self, hoy: NaiveDate) -> impl fmt::Display + '_ {
        struct Informe<'a> {
            festival: &'a Festival,
            hoy: NaiveDate,
        }

        impl fmt::Display for Informe<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let festival = self.festival;
                let inicio = festival.fecha_inicio();
                let fin = festival.fecha_fin();

                writeln!(
                    f,
                    "{}     [{}]",
                    festival.nombre(),
                    festival.estilos().iter().join(", ")
                )?;
                writeln!(f, "{}", festival.lugar())?;

                match festival.estado(self.hoy) {
                    Estado::Proximo { dias: 1 } => {
                        writeln!(f, "{} {} (queda 1 día)", dia_y_mes(inicio), inicio.year())?
                    }
                    Estado::Proximo { dias } => writeln!(
                        f,
                        "{} {} (quedan {} días)",
                        dia_y_mes(inicio),
                        inicio.year(),
                        dias
                    )?,
                    Estado::EnCurso => writeln!(
                        f,
                        "{} - {} {} (en curso)",
                        dia_y_mes(inicio),
                        dia_y_mes(fin),
                        fin.year()
                    )?,
                    Estado::Concluido => writeln!(
                        f,
                        "{} - {} {} (concluido)",
                        dia_y_mes(inicio),
                        dia_y_mes(fin),
                        fin.year()
                    )?,
                }

                f.write_str(SEPARATOR)
            }
        }

        Informe {
            festival: self,
            hoy,
        }
    }
}

impl AgendaFestivales {
    /// Report of every month with its festivals, as seen on `hoy`
    pub fn informe(&self, hoy: NaiveDate) -> impl fmt::Display + '_ {
        struct Informe<'a> {
            agenda: &'a AgendaFestivales,
            hoy: NaiveDate,
        }

        impl fmt::Display for Informe<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                writeln!(f, "Festivales")?;

                for (mes, festivales) in self.agenda.iter() {
                    writeln!(f)?;
                    writeln!(f, "{} ({} festival/es)", mes, festivales.len())?;

                    for festival in festivales {
                        writeln!(f, "{}", festival.informe(self.hoy))?;
                    }
                }

                Ok(())
            }
        }

        Informe { agenda: self, hoy }
    }
}

/// One `STYLE: name, name` line per style
pub fn informe_estilos(por_estilo: &BTreeMap<Estilo, BTreeSet<String>>) -> String {
    por_estilo
        .iter()
        .map(|(estilo, nombres)| format!("{}: {}", estilo, nombres.iter().join(", ")))
        .join("\n")
}

pub fn estilos_json(por_estilo: &BTreeMap<Estilo, BTreeSet<String>>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(por_estilo)
}

/// Every festival keyed by month name, in calendar and name order
pub fn agenda_json(agenda: &AgendaFestivales) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&agenda.iter().collect::<BTreeMap<_, _>>())
}

fn dia_y_mes(fecha: NaiveDate) -> String {
    format!("{} {}.", fecha.day(), Mes::de_fecha(fecha).abreviatura())
}
