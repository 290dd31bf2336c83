use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aki_inventory::{
    ProductApi,
    config::AppConfig,
    dto::products::{ImageUpload, ProductForm},
    models::Product,
};

#[derive(Parser)]
#[command(name = "aki-inventory")]
#[command(about = "Catalog and stock management for toy batteries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the inventory table
    List,
    /// Show the public catalog
    Catalog,
    /// Show one product
    Get { id: String },
    /// Add a new product
    Create(FormArgs),
    /// Replace the fields of an existing product
    Update {
        id: String,
        #[command(flatten)]
        form: FormArgs,
        /// Clear the current image
        #[arg(long)]
        remove_image: bool,
    },
    /// Permanently delete a product
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
struct FormArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    code: String,
    #[arg(long)]
    stock: String,
    #[arg(long)]
    price: String,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Image URL stored as-is
    #[arg(long)]
    image_url: Option<String>,
    /// Image file to attach
    #[arg(long)]
    image_file: Option<PathBuf>,
}

impl FormArgs {
    async fn into_form(self) -> anyhow::Result<ProductForm> {
        let image_file = match &self.image_file {
            Some(path) => Some(read_upload(path).await?),
            None => None,
        };
        Ok(ProductForm {
            name: self.name,
            code: self.code,
            stock: self.stock,
            price: self.price,
            category: self.category,
            description: self.description,
            image_url: self.image_url,
            image_file,
            image_removed: false,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,aki_inventory=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    let api = ProductApi::connect(&config).await?;

    match cli.command {
        Command::List => print_inventory(&api.list().await?),
        Command::Catalog => print_catalog(&api.list().await?),
        Command::Get { id } => match api.get_by_id(&id).await? {
            Some(product) => print_detail(&product),
            None => println!("Produk tidak ditemukan."),
        },
        Command::Create(form) => {
            let product = api.create(form.into_form().await?).await?;
            println!("Produk ditambahkan:");
            print_detail(&product);
        }
        Command::Update {
            id,
            form,
            remove_image,
        } => {
            let mut form = form.into_form().await?;
            form.image_removed = remove_image;
            match api.update(&id, form).await? {
                Some(product) => {
                    println!("Produk diperbarui:");
                    print_detail(&product);
                }
                None => println!("Produk tidak ditemukan."),
            }
        }
        Command::Delete { id, yes } => {
            let prompt = format!("Hapus produk {id}? Tindakan ini tidak dapat dibatalkan.");
            if !yes && !confirm(&prompt).await? {
                println!("Dibatalkan.");
                return Ok(());
            }
            if api.delete(&id).await? {
                println!("Produk {id} dihapus.");
            } else {
                println!("Produk tidak ditemukan.");
            }
        }
    }

    Ok(())
}

async fn read_upload(path: &Path) -> anyhow::Result<ImageUpload> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow::anyhow!("invalid image file name: {}", path.display()))?;
    let mut upload = ImageUpload::new(file_name, bytes);
    if let Some(content_type) = content_type_for(path) {
        upload = upload.with_content_type(content_type);
    }
    Ok(upload)
}

fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

async fn confirm(question: &str) -> anyhow::Result<bool> {
    println!("{question} [y/N]");
    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "ya" | "yes"))
}

fn print_inventory(products: &[Product]) {
    if products.is_empty() {
        println!("Belum ada produk di inventaris.");
        return;
    }
    println!(
        "{:<34} {:<10} {:<28} {:>6} {:>16}  {}",
        "ID", "Kode", "Nama", "Stok", "Harga", "Gambar"
    );
    for p in products {
        println!(
            "{:<34} {:<10} {:<28} {:>6} {:>16}  {}",
            p.id,
            p.code,
            p.name,
            p.stock,
            p.display_price(),
            p.image.as_deref().unwrap_or("No Image"),
        );
    }
}

fn print_catalog(products: &[Product]) {
    if products.is_empty() {
        println!("Belum ada produk.");
        return;
    }
    for p in products {
        println!("[{}]", p.image_or_placeholder());
        println!("{}", p.name);
        println!("  Kode: {} | Stok: {}", p.code, p.stock);
        println!("  {}", p.display_price());
        if let Some(description) = &p.description {
            println!("  {description}");
        }
        println!();
    }
}

fn print_detail(p: &Product) {
    println!("ID        : {}", p.id);
    println!("Nama      : {}", p.name);
    println!("Kode      : {}", p.code);
    println!("Stok      : {}", p.stock);
    println!("Harga     : {}", p.display_price());
    println!("Kategori  : {}", p.category.as_deref().unwrap_or("-"));
    println!("Deskripsi : {}", p.description.as_deref().unwrap_or("-"));
    println!("Gambar    : {}", p.image_or_placeholder());
}
