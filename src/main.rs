use agendafestivales::config::env_loader::load_config;
use agendafestivales::festivales::agenda::AgendaFestivales;
use agendafestivales::festivales::io::cargar_fichero;
use agendafestivales::festivales::model::hoy;
use agendafestivales::festivales::render::{agenda_json, estilos_json, informe_estilos};
use agendafestivales::tracing::setup_tracing;
use std::error::Error;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let loki = setup_tracing().await;

    let exit_code = match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    };

    if let Some(loki) = loki {
        loki.shutdown().await;
    }

    exit_code
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = load_config()?;
    let hoy = hoy();

    info!(?config, "Config loaded");

    let mut agenda = AgendaFestivales::new();
    cargar_fichero(&mut agenda, &config.festivales_file)?;

    let por_estilo = agenda.festivales_por_estilo();
    if config.output_json {
        println!("{}", agenda_json(&agenda)?);
        println!("{}", estilos_json(&por_estilo)?);
    } else {
        println!("{}", agenda.informe(hoy));
        println!("Festivales por estilo\n\n{}", informe_estilos(&por_estilo));
    }

    let Some(cancel_config) = config.cancel_config else {
        return Ok(());
    };

    match agenda.cancelar_festivales_en(&cancel_config.venues, cancel_config.month, hoy) {
        Ok(cancelled) => {
            info!("Cancelled {} festivals in {}", cancelled, cancel_config.month);

            println!(
                "\nCancelados {} festival/es en {}\n",
                cancelled, cancel_config.month
            );
            if config.output_json {
                println!("{}", agenda_json(&agenda)?);
            } else {
                println!("{}", agenda.informe(hoy));
            }
        }
        Err(err) => {
            warn!("Nothing cancelled: {}", err);
        }
    }

    Ok(())
}
