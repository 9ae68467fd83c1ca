use super::agenda::AgendaFestivales;
use super::model::{Estilo, Festival, FestivalError};
use chrono::NaiveDate;
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, instrument, trace, warn};
use voca_rs::case;

const SEPARATOR: char = ':';
const DATE_FORMAT: &str = "%d-%m-%Y";

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing field '{0}'")]
    CampoAusente(&'static str),
    #[error("invalid start date '{valor}', expected dd-mm-yyyy")]
    FechaInvalida {
        valor: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("invalid duration '{valor}'")]
    DuracionInvalida {
        valor: String,
        #[source]
        source: ParseIntError,
    },
    #[error("unknown style '{0}'")]
    EstiloDesconocido(String),
    #[error(transparent)]
    Festival(#[from] FestivalError),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("couldn't open {}", path.display())]
    Fichero {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed reading festivals")]
    Io(#[from] io::Error),
}

/**
Parses one festival record:

`name : venue : dd-mm-yyyy : duration : style [: style ...]`

Every word of the name gets its first letter capitalized and the venue is
uppercased.
*/
pub fn parsear_linea(linea: &str) -> Result<Festival, ParseError> {
    let mut campos = linea.split(SEPARATOR).map(str::trim);

    let nombre = capitalizar(campos.next().unwrap_or_default());
    let lugar = campos.next().ok_or(ParseError::CampoAusente("lugar"))?;
    let fecha = parsear_fecha(campos.next().ok_or(ParseError::CampoAusente("fecha"))?)?;
    let duracion = parsear_duracion(campos.next().ok_or(ParseError::CampoAusente("duracion"))?)?;
    let estilos = campos
        .filter(|campo| !campo.is_empty())
        .map(|campo| {
            Estilo::from_str(campo).map_err(|_| ParseError::EstiloDesconocido(campo.to_string()))
        })
        .collect::<Result<Vec<Estilo>, ParseError>>()?;

    Ok(Festival::new(nombre, lugar, fecha, duracion, estilos)?)
}

impl FromStr for Festival {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parsear_linea(s)
    }
}

fn capitalizar(nombre: &str) -> String {
    WHITESPACE
        .split(nombre)
        .filter(|palabra| !palabra.is_empty())
        .map(|palabra| case::capitalize(palabra, false))
        .join(" ")
}

fn parsear_fecha(valor: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(valor, DATE_FORMAT).map_err(|source| ParseError::FechaInvalida {
        valor: valor.to_string(),
        source,
    })
}

fn parsear_duracion(valor: &str) -> Result<u32, ParseError> {
    valor
        .parse()
        .map_err(|source| ParseError::DuracionInvalida {
            valor: valor.to_string(),
            source,
        })
}

/**
Adds every record read from `reader` to the agenda, until end of input.

Blank lines are ignored and malformed records are skipped with a warning.
Returns how many festivals were added.
*/
#[instrument(skip_all)]
pub fn cargar_festivales(
    agenda: &mut AgendaFestivales,
    reader: impl BufRead,
) -> Result<usize, LoadError> {
    let mut cargados = 0;

    for (indice, linea) in reader.lines().enumerate() {
        let linea = linea?;

        if linea.trim().is_empty() {
            continue;
        }

        match parsear_linea(&linea) {
            Ok(festival) => {
                trace!("Loaded '{}' ({})", festival.nombre(), festival.mes());

                agenda.add_festival(festival);
                cargados += 1;
            }
            Err(err) => {
                warn!(line = indice + 1, "Skipping malformed record: {}", err);
            }
        }
    }

    info!("Loaded {} festivals", cargados);

    Ok(cargados)
}

#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn cargar_fichero(
    agenda: &mut AgendaFestivales,
    path: impl AsRef<Path>,
) -> Result<usize, LoadError> {
    let path = path.as_ref();
    let fichero = File::open(path).map_err(|source| LoadError::Fichero {
        path: path.to_path_buf(),
        source,
    })?;

    cargar_festivales(agenda, BufReader::new(fichero))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::festivales::model::Mes;
    use std::io::Cursor;

    #[test_log::test]
    fn should_parse_a_record_with_spaces_around_fields() {
        let festival =
            parsear_linea("Gazpatxo Rock : valencia: 28-02-2022  :1  :rock:punk : hiphop ")
                .unwrap();

        assert_eq!(festival.nombre(), "Gazpatxo Rock");
        assert_eq!(festival.lugar(), "VALENCIA");
        assert_eq!(
            festival.fecha_inicio(),
            NaiveDate::from_ymd_opt(2022, 2, 28).unwrap()
        );
        assert_eq!(festival.duracion(), 1);
        assert_eq!(
            festival.estilos().iter().copied().collect::<Vec<_>>(),
            vec![Estilo::Rock, Estilo::Punk, Estilo::Hiphop]
        );
    }

    #[test_log::test]
    fn should_capitalize_every_word_of_the_name() {
        let festival = parsear_linea("  benidorm   fest:benidorm:26-01-2022:3:indie: pop  :rock")
            .unwrap();

        assert_eq!(festival.nombre(), "Benidorm Fest");
        assert_eq!(festival.mes(), Mes::Enero);
    }

    #[test_log::test]
    fn should_keep_the_rest_of_each_word() {
        assert_eq!(capitalizar("guitar BCN"), "Guitar BCN");
        assert_eq!(capitalizar("black sound fest"), "Black Sound Fest");
    }

    #[test_log::test]
    fn should_parse_through_from_str() {
        let festival: Festival = "guitar bcn:barcelona: 28-01-2022 :  170:indie:pop:fusion"
            .parse()
            .unwrap();

        assert_eq!(festival.nombre(), "Guitar Bcn");
        assert_eq!(festival.duracion(), 170);
    }

    #[test_log::test]
    fn when_a_field_is_missing_should_fail() {
        let result = parsear_linea("black sound fest:badajoz");

        assert!(matches!(result, Err(ParseError::CampoAusente("fecha"))));
    }

    #[test_log::test]
    fn when_the_date_is_malformed_should_fail() {
        let result = parsear_linea("black sound fest:badajoz:2022-02-05:21:rock");

        assert!(matches!(result, Err(ParseError::FechaInvalida { .. })));
    }

    #[test_log::test]
    fn when_the_duration_is_not_a_number_should_fail() {
        let result = parsear_linea("black sound fest:badajoz:05-02-2022:many:rock");

        assert!(matches!(result, Err(ParseError::DuracionInvalida { .. })));
    }

    #[test_log::test]
    fn when_a_style_is_unknown_should_fail() {
        let result = parsear_linea("black sound fest:badajoz:05-02-2022:21:rock:jazz");

        assert!(matches!(result, Err(ParseError::EstiloDesconocido(style)) if style == "jazz"));
    }

    #[test_log::test]
    fn when_there_are_no_styles_should_fail() {
        let result = parsear_linea("black sound fest:badajoz:05-02-2022:21:");

        assert!(matches!(
            result,
            Err(ParseError::Festival(FestivalError::SinEstilos(_)))
        ));
    }

    #[test_log::test]
    fn when_the_duration_is_zero_should_fail() {
        let result = parsear_linea("black sound fest:badajoz:05-02-2022:0:rock");

        assert!(matches!(
            result,
            Err(ParseError::Festival(FestivalError::DuracionNula(_)))
        ));
    }

    #[test_log::test]
    fn should_load_records_skipping_blank_and_malformed_lines() {
        let records = "\
gazpatxo rock:valencia:28-02-2022:1:rock:punk:hiphop

black sound fest:badajoz:05-02-2022:21:rock:blues
not a festival
guitar bcn:barcelona:28-01-2022:170:indie:pop:fusion
";
        let mut agenda = AgendaFestivales::new();

        let cargados = cargar_festivales(&mut agenda, Cursor::new(records)).unwrap();

        assert_eq!(cargados, 3);
        assert_eq!(agenda.festivales_en_mes(Mes::Febrero), 2);
        assert_eq!(agenda.festivales_en_mes(Mes::Enero), 1);
    }

    #[test_log::test]
    fn when_the_file_does_not_exist_should_fail() {
        let mut agenda = AgendaFestivales::new();

        let result = cargar_fichero(&mut agenda, "does/not/exist.csv");

        assert!(matches!(result, Err(LoadError::Fichero { .. })));
        assert!(agenda.is_empty());
    }
}
