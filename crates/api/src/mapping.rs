//! Mapping between wire DTOs and persisted stock items.
//!
//! Pure and total: no validation happens here (that is `BeerDto::validate` and
//! the stock service's job).

use beerstock_core::ItemId;
use beerstock_inventory::StockItem;

use crate::app::dto::BeerDto;

pub fn to_persisted(dto: BeerDto) -> StockItem {
    StockItem {
        id: dto.id.map(ItemId::new),
        name: dto.name,
        brand: dto.brand,
        capacity: dto.capacity,
        quantity: dto.quantity,
        category: dto.category,
    }
}

pub fn to_wire(item: StockItem) -> BeerDto {
    BeerDto {
        id: item.id.map(i64::from),
        name: item.name,
        brand: item.brand,
        capacity: item.capacity,
        quantity: item.quantity,
        category: item.category,
    }
}
