//! Hand-written entities shared by the unit tests.
//! They mirror what `#[derive(Entity)]` generates, without the macro.

use crate::{
    path::{Collection, Field, FieldPath},
    traits::{Entity, FieldSet, PathList, PathRef},
};

// fields_type
macro_rules! fields_type {
    ($name:ident) => {
        #[derive(Clone, Debug)]
        pub(crate) struct $name(FieldPath);

        impl PathRef for $name {
            fn field_path(&self) -> &FieldPath {
                &self.0
            }
        }

        impl PathList for $name {
            fn field_paths(&self) -> Vec<&FieldPath> {
                vec![&self.0]
            }
        }

        impl FieldSet for $name {
            fn at(path: FieldPath) -> Self {
                Self(path)
            }
        }
    };
}

///
/// Customer
///

pub(crate) struct Customer;

fields_type!(CustomerFields);

impl Entity for Customer {
    type Fields = CustomerFields;
    const ENTITY_SET: &'static str = "Customers";
}

impl CustomerFields {
    pub(crate) fn name(&self) -> Field {
        Field::new(self.0.child("Name"))
    }

    pub(crate) fn first_name(&self) -> Field {
        Field::new(self.0.child("FirstName"))
    }

    pub(crate) fn last_name(&self) -> Field {
        Field::new(self.0.child("LastName"))
    }

    pub(crate) fn age(&self) -> Field {
        Field::new(self.0.child("Age"))
    }

    pub(crate) fn manager(&self) -> Field {
        Field::new(self.0.child("Manager"))
    }

    pub(crate) fn address(&self) -> AddressFields {
        AddressFields::at(self.0.child("Address"))
    }

    pub(crate) fn orders(&self) -> Collection<Order> {
        Collection::new(self.0.child("Orders"))
    }

    /// The entity root itself; never resolves.
    pub(crate) fn itself(&self) -> FieldPath {
        self.0.clone()
    }

    pub(crate) fn into_root(self) -> FieldPath {
        self.0
    }
}

///
/// Address
///

pub(crate) struct Address;

fields_type!(AddressFields);

impl Entity for Address {
    type Fields = AddressFields;
    const ENTITY_SET: &'static str = "Addresses";
}

impl AddressFields {
    pub(crate) fn city(&self) -> Field {
        Field::new(self.0.child("City"))
    }
}

///
/// Order
///

pub(crate) struct Order;

fields_type!(OrderFields);

impl Entity for Order {
    type Fields = OrderFields;
    const ENTITY_SET: &'static str = "Orders";
}

impl OrderFields {
    pub(crate) fn amount(&self) -> Field {
        Field::new(self.0.child("Amount"))
    }

    pub(crate) fn items(&self) -> Collection<Item> {
        Collection::new(self.0.child("Items"))
    }
}

///
/// Item
///

pub(crate) struct Item;

fields_type!(ItemFields);

impl Entity for Item {
    type Fields = ItemFields;
    const ENTITY_SET: &'static str = "Items";
}

impl ItemFields {
    pub(crate) fn sku(&self) -> Field {
        Field::new(self.0.child("Sku"))
    }

    pub(crate) fn quantity(&self) -> Field {
        Field::new(self.0.child("Quantity"))
    }
}
