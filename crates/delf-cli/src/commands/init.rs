//! The `delf init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("delf.toml").exists() {
        println!("delf.toml already exists, skipping.");
    } else {
        std::fs::write("delf.toml", SAMPLE_CONFIG)?;
        println!("Created delf.toml");
    }

    std::fs::create_dir_all("requests")?;
    let example_path = std::path::Path::new("requests/example.json");
    if example_path.exists() {
        println!("requests/example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_REQUEST)?;
        println!("Created requests/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Export ANTHROPIC_API_KEY (or GEMINI_API_KEY and set provider = \"gemini\")");
    println!("  2. Run: delf check-config");
    println!("  3. Run: delf evaluate --request requests/example.json --format table");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# delf configuration

# "anthropic" or "gemini"
provider = "anthropic"
model = "claude-sonnet-4-20250514"
api_key = "${ANTHROPIC_API_KEY}"

# Deadline for a single backend call
timeout_secs = 120
temperature = 0.0
"#;

const EXAMPLE_REQUEST: &str = r#"{
  "exercise_type": "production_ecrite",
  "user_answer": "Madame, Monsieur,\n\nJe vous écris au sujet du projet de fermeture de la bibliothèque municipale. En tant qu'habitant du quartier depuis dix ans, je considère que cette décision serait regrettable. D'abord, la bibliothèque est un lieu de rencontre pour les jeunes et les personnes âgées. Ensuite, elle offre un accès gratuit à la culture.\n\nJe vous prie d'agréer, Madame, Monsieur, mes salutations distinguées.",
  "criteria": [
    {
      "name": "Respect de la consigne",
      "description": "Le texte respecte le genre (lettre formelle) et la situation",
      "max_points": 5
    },
    {
      "name": "Argumentation",
      "description": "Capacité à présenter et défendre une opinion",
      "max_points": 10
    },
    {
      "name": "Correction linguistique",
      "description": "Grammaire, lexique et orthographe",
      "max_points": 10
    }
  ],
  "exercise_content": {
    "prompt": "La mairie de votre ville envisage de fermer la bibliothèque municipale. Vous écrivez au maire pour exprimer votre désaccord (250 mots minimum)."
  }
}
"#;
