use std::str::FromStr;

use crate::lead::{
    ConferenceRooms, Lead, LeadError, Pantry, PropertyInterest, Rooms, SpaceRequirements,
    Workstations,
};
use crate::listing::{Listing, Pagination};
use crate::server::proto;
use crate::stats::PrefixStats;

pub fn listing_to_proto(listing: Listing) -> proto::Listing {
    let [views_min, views_max] = listing.views_range;
    proto::Listing {
        property_code: listing.property_code.to_string(),
        r#type: listing.kind.to_string(),
        created_at: listing.created_at.to_rfc3339(),
        updated_at: listing.updated_at.to_rfc3339(),
        id: listing.id,
        title: listing.title,
        location: listing.location,
        area: listing.area,
        price: listing.price,
        price_numeric: listing.price_numeric,
        images: listing.images,
        features: listing.features,
        views_min,
        views_max,
        is_active: listing.is_active,
        featured: listing.featured,
        views: listing.views,
    }
}

pub fn pagination_to_proto(p: Pagination) -> proto::Pagination {
    proto::Pagination {
        current: p.current,
        pages: p.pages,
        total: p.total,
        has_next: p.has_next,
        has_prev: p.has_prev,
    }
}

pub fn prefix_stats_to_proto(stats: PrefixStats) -> proto::PrefixCounter {
    proto::PrefixCounter {
        last_updated: stats.last_updated.to_rfc3339(),
        prefix: stats.prefix,
        count: stats.count,
    }
}

pub fn lead_to_proto(lead: Lead) -> proto::Lead {
    proto::Lead {
        formatted_total_area: lead.formatted_total_area(),
        space_breakdown: lead.space_breakdown(),
        space_requirements: Some(space_to_proto(lead.space_requirements)),
        source: lead.source.to_string(),
        status: lead.status.to_string(),
        follow_up_date: lead
            .follow_up_date
            .map(|at| at.to_rfc3339())
            .unwrap_or_default(),
        created_at: lead.created_at.to_rfc3339(),
        updated_at: lead.updated_at.to_rfc3339(),
        property: lead.property.map(property_to_proto),
        ip_address: lead.ip_address.unwrap_or_default(),
        id: lead.id,
        name: lead.name,
        company: lead.company,
        designation: lead.designation,
        phone: lead.phone,
        email: lead.email,
        total_area: lead.total_area,
        notes: lead.notes,
        notification_sent: lead.notification_sent,
    }
}

fn rooms_to_proto(rooms: Rooms) -> proto::Rooms {
    proto::Rooms {
        count: rooms.count,
        area: rooms.area,
    }
}

pub fn space_to_proto(space: SpaceRequirements) -> proto::SpaceRequirements {
    proto::SpaceRequirements {
        workstations: Some(proto::Workstations {
            r#type: space.workstations.kind.to_string(),
            persons: space.workstations.persons,
            area: space.workstations.area,
        }),
        cabins: Some(rooms_to_proto(space.cabins)),
        reception: Some(rooms_to_proto(space.reception)),
        pantry: Some(proto::Pantry {
            r#type: space.pantry.kind.to_string(),
            count: space.pantry.count,
            area: space.pantry.area,
        }),
        conference_room: Some(proto::ConferenceRooms {
            r#type: space.conference_room.kind.to_string(),
            count: space.conference_room.count,
            area: space.conference_room.area,
        }),
        server_room: Some(rooms_to_proto(space.server_room)),
    }
}

/// Blank means the default kind.
fn kind_or_default<T>(value: &str) -> Result<T, LeadError>
where
    T: FromStr<Err = LeadError> + Default,
{
    if value.trim().is_empty() {
        Ok(T::default())
    } else {
        value.parse()
    }
}

fn rooms_from_proto(rooms: Option<proto::Rooms>) -> Rooms {
    rooms
        .map(|r| Rooms {
            count: r.count,
            area: r.area,
        })
        .unwrap_or_default()
}

/// Missing sub-messages are empty categories; unknown kinds are rejected.
pub fn space_from_proto(space: proto::SpaceRequirements) -> Result<SpaceRequirements, LeadError> {
    let workstations = match space.workstations {
        Some(w) => Workstations {
            kind: kind_or_default(&w.r#type)?,
            persons: w.persons,
            area: w.area,
        },
        None => Workstations::default(),
    };
    let pantry = match space.pantry {
        Some(p) => Pantry {
            kind: kind_or_default(&p.r#type)?,
            count: p.count,
            area: p.area,
        },
        None => Pantry::default(),
    };
    let conference_room = match space.conference_room {
        Some(c) => ConferenceRooms {
            kind: kind_or_default(&c.r#type)?,
            count: c.count,
            area: c.area,
        },
        None => ConferenceRooms::default(),
    };

    Ok(SpaceRequirements {
        workstations,
        cabins: rooms_from_proto(space.cabins),
        reception: rooms_from_proto(space.reception),
        pantry,
        conference_room,
        server_room: rooms_from_proto(space.server_room),
    })
}

pub fn property_to_proto(property: PropertyInterest) -> proto::PropertyInterest {
    proto::PropertyInterest {
        title: property.title,
        property_code: property.property_code,
        location: property.location,
        area: property.area,
        price: property.price,
        r#type: property.kind,
        features: property.features,
    }
}

pub fn property_from_proto(property: proto::PropertyInterest) -> PropertyInterest {
    PropertyInterest {
        title: property.title,
        property_code: property.property_code,
        location: property.location,
        area: property.area,
        price: property.price,
        kind: property.r#type,
        features: property.features,
    }
}
