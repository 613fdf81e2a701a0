#[actix_web::main]
async fn main() -> std::io::Result<()> {
    rental_agreement::run().await
}
