use std::env;
use std::fs;
use std::path::Path;

// Solo se reenvían variables de la app (prefijo RECICLA365_)
const ENV_PREFIX: &str = "RECICLA365_";

fn main() {
    let env_file = Path::new(".env");

    if let Ok(contents) = fs::read_to_string(env_file) {
        println!("cargo:rerun-if-changed=.env");

        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                println!("cargo:warning=Línea inválida en .env: {}", line);
                continue;
            };

            let key = key.trim();
            if !key.starts_with(ENV_PREFIX) {
                continue;
            }

            // El entorno del proceso tiene prioridad sobre .env
            if env::var(key).is_err() {
                println!("cargo:rustc-env={}={}", key, value.trim().trim_matches('"'));
            }
        }
    } else {
        println!("cargo:warning=No se encontró .env, usando valores por defecto (ver .env.example)");
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env.example");
}
