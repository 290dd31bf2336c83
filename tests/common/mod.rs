use aki_inventory::{ProductApi, dto::products::ProductForm};

pub fn aki_a() -> ProductForm {
    ProductForm::new("Aki A", "AKI001", 10, 50000)
}

/// Create, read, replace, remove and delete one product. Both backends must
/// pass this unchanged.
pub async fn crud_contract(api: &ProductApi) -> anyhow::Result<()> {
    let created = api.create(aki_a()).await?;
    assert!(!created.id.is_empty());
    assert_eq!(created.name, "Aki A");
    assert_eq!(created.code, "AKI001");
    assert_eq!(created.stock, 10);
    assert_eq!(created.price, 50000.0);
    assert_eq!(created.image, None);

    assert_eq!(api.list().await?, vec![created.clone()]);
    assert_eq!(api.get_by_id(&created.id).await?, Some(created.clone()));

    let with_url = api
        .update(
            &created.id,
            ProductForm::new("Aki A Plus", "AKI001", 7, "55000.5")
                .category("Aki Kering")
                .image_url("https://cdn.example.com/aki-a.jpg"),
        )
        .await?
        .expect("product exists");
    assert_eq!(with_url.id, created.id);
    assert_eq!(with_url.stock, 7);
    assert_eq!(with_url.price, 55000.5);
    assert_eq!(with_url.category.as_deref(), Some("Aki Kering"));
    assert_eq!(with_url.image.as_deref(), Some("https://cdn.example.com/aki-a.jpg"));

    // No image input keeps the reference; omitted optional fields are cleared.
    let kept = api
        .update(&created.id, ProductForm::new("Aki A Plus", "AKI001", 6, 55000))
        .await?
        .expect("product exists");
    assert_eq!(kept.image, with_url.image);
    assert_eq!(kept.category, None);
    assert_eq!(api.get_by_id(&created.id).await?, Some(kept.clone()));

    let cleared = api
        .update(
            &created.id,
            ProductForm::new("Aki A Plus", "AKI001", 6, 55000).remove_image(),
        )
        .await?
        .expect("product exists");
    assert_eq!(cleared.image, None);

    assert_eq!(api.update("missing-id", aki_a()).await?, None);

    let err = api
        .update(&created.id, ProductForm::new("Aki A", "AKI001", "-1", 1))
        .await
        .unwrap_err();
    assert!(err.is_validation(), "unexpected error: {err}");
    let err = api
        .create(ProductForm::new("Aki B", "AKI002", 5, "abc"))
        .await
        .unwrap_err();
    assert!(err.is_validation(), "unexpected error: {err}");
    assert_eq!(api.list().await?, vec![cleared.clone()]);

    assert!(api.delete(&created.id).await?);
    assert_eq!(api.get_by_id(&created.id).await?, None);
    assert!(!api.delete(&created.id).await?);
    assert!(api.list().await?.is_empty());

    Ok(())
}

/// Ids that look like URL syntax are still plain ids that match nothing.
pub async fn unknown_ids_are_absent(api: &ProductApi) -> anyhow::Result<()> {
    let created = api.create(aki_a()).await?;

    for id in ["", ".", "..", "?page=1", "#frag", "a/b", "../barang"] {
        assert_eq!(api.get_by_id(id).await?, None, "get {id:?}");
        assert_eq!(api.update(id, aki_a()).await?, None, "update {id:?}");
        assert!(!api.delete(id).await?, "delete {id:?}");
    }

    assert_eq!(api.list().await?, vec![created]);
    Ok(())
}
